use crate::types::{CardRequest, Printing, ProxyError, Result};
use std::path::Path;

const NAME_COLUMNS: &[&str] = &["name"];
const COUNT_COLUMNS: &[&str] = &["count", "quantity"];
const SET_COLUMNS: &[&str] = &["edition", "set"];
const NUMBER_COLUMNS: &[&str] = &["collector number", "number"];

/// Column positions resolved from the header row.
struct Columns {
    name: usize,
    count: Option<usize>,
    set: Option<usize>,
    number: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let find = |aliases: &[&str]| {
            aliases.iter().find_map(|alias| {
                headers
                    .iter()
                    .position(|h| h.trim().eq_ignore_ascii_case(alias))
            })
        };

        let name = find(NAME_COLUMNS)
            .ok_or_else(|| ProxyError::Decklist("CSV has no 'Name' column".to_string()))?;

        Ok(Self {
            name,
            count: find(COUNT_COLUMNS),
            set: find(SET_COLUMNS),
            number: find(NUMBER_COLUMNS),
        })
    }
}

fn field<'r>(record: &'r csv::StringRecord, index: Option<usize>) -> Option<&'r str> {
    index
        .and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Parse a header-driven CSV export (Moxfield style).
///
/// Rows with an empty name or a non-numeric count are skipped; only a
/// missing `Name` column or an unreadable header fails the import.
pub fn parse_csv(content: &str) -> Result<Vec<CardRequest>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());
    let columns = Columns::from_headers(reader.headers()?)?;

    let mut cards = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                log::warn!("Skipping unreadable CSV row {}: {}", row + 1, e);
                continue;
            }
        };

        let Some(name) = field(&record, Some(columns.name)) else {
            continue;
        };

        // No count column means one copy; a blank count cell is invalid
        let quantity = match columns.count {
            None => 1,
            Some(index) => {
                let raw = record.get(index).map(str::trim).unwrap_or_default();
                match raw.parse::<u32>() {
                    Ok(0) => continue,
                    Ok(n) => n,
                    Err(_) => {
                        log::warn!("Skipping '{}': invalid count '{}'", name, raw);
                        continue;
                    }
                }
            }
        };

        let mut card = CardRequest::new(name, quantity);
        if let (Some(set), Some(number)) = (
            field(&record, columns.set),
            field(&record, columns.number),
        ) {
            card = card.with_printing(Printing::new(set, number));
        }
        cards.push(card);
    }

    Ok(cards)
}

pub async fn load_from_csv(path: impl AsRef<Path>) -> Result<Vec<CardRequest>> {
    let path = path.as_ref().to_owned();

    let contents = tokio::fs::read_to_string(&path).await?;

    let cards = tokio::task::spawn_blocking(move || parse_csv(&contents)).await??;

    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moxfield_export() {
        let content = "\"Count\",\"Tradelist Count\",\"Name\",\"Edition\",\"Condition\",\"Language\",\"Foil\",\"Collector Number\"\n\
                       \"4\",\"0\",\"Lightning Bolt\",\"2x2\",\"Near Mint\",\"English\",\"\",\"117\"\n\
                       \"1\",\"0\",\"Sol Ring\",\"MH3\",\"Near Mint\",\"English\",\"foil\",\"532\"\n";
        let cards = parse_csv(content).unwrap();

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].name, "Lightning Bolt");
        assert_eq!(cards[0].quantity, 4);
        assert_eq!(cards[0].printing, Some(Printing::new("2x2", "117")));
        assert_eq!(cards[1].printing.as_ref().unwrap().set_code, "mh3");
    }

    #[test]
    fn test_column_order_and_aliases() {
        let content = "Number,Set,Quantity,Name\n51a,ISD,2,Delver of Secrets\n";
        let cards = parse_csv(content).unwrap();

        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].quantity, 2);
        assert_eq!(cards[0].printing, Some(Printing::new("isd", "51a")));
    }

    #[test]
    fn test_missing_optional_fields() {
        let content = "Name,Count,Edition\nCounterspell,3,\n";
        let cards = parse_csv(content).unwrap();

        assert_eq!(cards, vec![CardRequest::new("Counterspell", 3)]);
    }

    #[test]
    fn test_blank_count_skips_row() {
        let content = "Count,Name\n,Dark Ritual\n2,Counterspell\n";
        let cards = parse_csv(content).unwrap();

        assert_eq!(cards, vec![CardRequest::new("Counterspell", 2)]);
    }

    #[test]
    fn test_no_count_column_means_one_copy() {
        let content = "Name,Set,Number\nDark Ritual,LEA,98\n";
        let cards = parse_csv(content).unwrap();

        assert_eq!(cards, vec![
            CardRequest::new("Dark Ritual", 1).with_printing(Printing::new("lea", "98")),
        ]);
    }

    #[test]
    fn test_bad_rows_are_skipped_not_fatal() {
        let content = "Count,Name\nfour,Lightning Bolt\n2,Counterspell\n1,\n";
        let cards = parse_csv(content).unwrap();

        assert_eq!(cards, vec![CardRequest::new("Counterspell", 2)]);
    }

    #[test]
    fn test_missing_name_column_fails() {
        let result = parse_csv("Count,Card\n1,Sol Ring\n");
        assert!(matches!(result, Err(ProxyError::Decklist(_))));
    }
}
