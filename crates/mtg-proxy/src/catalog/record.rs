use serde::Deserialize;

/// Image renditions offered for one card face.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Renditions {
    pub png: Option<String>,
    pub large: Option<String>,
    pub normal: Option<String>,
    pub small: Option<String>,
}

impl Renditions {
    /// Best rendition for printing: `png`, then `large`, then `normal`.
    pub fn best(&self) -> Option<&str> {
        self.png
            .as_deref()
            .or(self.large.as_deref())
            .or(self.normal.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CardFace {
    pub name: String,
    #[serde(rename = "image_uris")]
    pub renditions: Option<Renditions>,
}

/// A card as returned by the catalog.
///
/// Only the fields the pipeline reads are decoded; everything else in the
/// response is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CardRecord {
    pub name: String,
    #[serde(rename = "set")]
    pub set_code: Option<String>,
    pub collector_number: Option<String>,
    #[serde(rename = "image_uris")]
    pub renditions: Option<Renditions>,
    #[serde(default)]
    pub card_faces: Vec<CardFace>,
}

impl CardRecord {
    /// Artwork to print.
    ///
    /// Single-faced cards carry renditions at the top level. Multi-faced
    /// cards may carry them per face, in which case only the first face is
    /// used. Top-level renditions without a printable size fall through to
    /// the first face.
    pub fn artwork_url(&self) -> Option<&str> {
        self.renditions
            .as_ref()
            .and_then(Renditions::best)
            .or_else(|| {
                self.card_faces
                    .first()
                    .and_then(|face| face.renditions.as_ref())
                    .and_then(Renditions::best)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rendition_precedence() {
        let mut r = Renditions {
            png: Some("p".into()),
            large: Some("l".into()),
            normal: Some("n".into()),
            small: Some("s".into()),
        };
        assert_eq!(r.best(), Some("p"));
        r.png = None;
        assert_eq!(r.best(), Some("l"));
        r.large = None;
        assert_eq!(r.best(), Some("n"));
        r.normal = None;
        assert_eq!(r.best(), None);
    }

    #[test]
    fn test_decode_single_faced() {
        let json = r#"{
            "object": "card",
            "name": "Sol Ring",
            "set": "mh3",
            "collector_number": "532",
            "image_uris": {
                "small": "https://img/s.jpg",
                "normal": "https://img/n.jpg",
                "large": "https://img/l.jpg",
                "png": "https://img/p.png",
                "art_crop": "https://img/a.jpg"
            }
        }"#;
        let record: CardRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.name, "Sol Ring");
        assert_eq!(record.set_code.as_deref(), Some("mh3"));
        assert_eq!(record.collector_number.as_deref(), Some("532"));
        assert_eq!(record.artwork_url(), Some("https://img/p.png"));
    }

    #[test]
    fn test_decode_double_faced_uses_first_face() {
        let json = r#"{
            "name": "Delver of Secrets // Insectile Aberration",
            "set": "isd",
            "collector_number": "51",
            "card_faces": [
                {"name": "Delver of Secrets", "image_uris": {"large": "https://img/front.jpg"}},
                {"name": "Insectile Aberration", "image_uris": {"png": "https://img/back.png"}}
            ]
        }"#;
        let record: CardRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.artwork_url(), Some("https://img/front.jpg"));
    }

    #[test]
    fn test_unprintable_top_level_falls_back_to_face() {
        let json = r#"{
            "name": "Brazen Borrower // Petty Theft",
            "image_uris": {"small": "https://img/s.jpg"},
            "card_faces": [
                {"name": "Brazen Borrower", "image_uris": {"normal": "https://img/face.jpg"}}
            ]
        }"#;
        let record: CardRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.artwork_url(), Some("https://img/face.jpg"));
    }

    #[test]
    fn test_no_artwork() {
        let record = CardRecord {
            name: "Mystery".into(),
            ..Default::default()
        };
        assert_eq!(record.artwork_url(), None);
    }
}
