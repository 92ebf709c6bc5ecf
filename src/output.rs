//! Terminal output for CLI results

use comfy_table::presets::NOTHING;
use comfy_table::{Cell, ContentArrangement, Table};
use merche::{Resource, ResourceMetaInfo};
use serde::Serialize;

const EMPTY_CELL: &str = "-";

/// Borderless table with a header row
fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(NOTHING)
        .set_content_arrangement(ContentArrangement::Disabled)
        .set_header(headers.iter().map(Cell::new));
    table
}

fn cell(value: Option<&str>) -> &str {
    value.unwrap_or(EMPTY_CELL)
}

pub fn resource_list_table(resources: &[ResourceMetaInfo]) -> String {
    let mut table = new_table(&["NAME", "VERSION", "HREF"]);
    for r in resources {
        table.add_row(vec![
            cell(r.name.as_deref()),
            cell(r.version.as_deref()),
            cell(r.href.as_deref()),
        ]);
    }
    table.to_string()
}

pub fn resource_table(resources: &[Resource]) -> String {
    let mut table = new_table(&["NAME", "VALUE", "RECORDED"]);
    for r in resources {
        let recorded = r
            .value
            .recorded_at()
            .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| EMPTY_CELL.to_string());
        table.add_row(vec![
            r.name.clone(),
            cell(r.value.value.as_deref()).to_string(),
            recorded,
        ]);
    }
    table.to_string()
}

pub fn json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use merche::ResourceValue;

    /// Cells of each rendered line, ignoring padding
    fn cells(table: &str) -> Vec<Vec<&str>> {
        table
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.split_whitespace().collect())
            .collect()
    }

    #[test]
    fn test_resource_list_table_rows() {
        let table = resource_list_table(&[
            ResourceMetaInfo {
                name: Some("sunroofstatus".to_string()),
                version: Some("1.0".to_string()),
                href: Some("/vehicles/V1/resources/sunroofstatus".to_string()),
            },
            ResourceMetaInfo {
                name: Some("rooftopstatus".to_string()),
                version: None,
                href: None,
            },
        ]);

        assert_eq!(
            cells(&table),
            vec![
                vec!["NAME", "VERSION", "HREF"],
                vec!["sunroofstatus", "1.0", "/vehicles/V1/resources/sunroofstatus"],
                vec!["rooftopstatus", "-", "-"],
            ]
        );
    }

    #[test]
    fn test_columns_are_aligned() {
        let table = resource_list_table(&[
            ResourceMetaInfo {
                name: Some("sunroofstatus".to_string()),
                version: Some("1.0".to_string()),
                href: None,
            },
            ResourceMetaInfo {
                name: Some("x".to_string()),
                version: Some("2.0".to_string()),
                href: None,
            },
        ]);

        let lines: Vec<&str> = table.lines().filter(|l| !l.trim().is_empty()).collect();
        let column = |line: &str, text: &str| line.find(text).unwrap();
        assert_eq!(column(lines[0], "VERSION"), column(lines[1], "1.0"));
        assert_eq!(column(lines[1], "1.0"), column(lines[2], "2.0"));
    }

    #[test]
    fn test_resource_table_formats_timestamp() {
        let table = resource_table(&[Resource {
            name: "doorlockstatusdecklid".to_string(),
            value: ResourceValue {
                value: Some("false".to_string()),
                timestamp: Some(1565276208),
            },
        }]);

        assert_eq!(
            cells(&table)[1],
            vec!["doorlockstatusdecklid", "false", "2019-08-08", "14:56:48", "UTC"]
        );
    }

    #[test]
    fn test_resource_table_without_timestamp() {
        let table = resource_table(&[Resource {
            name: "sunroofstatus".to_string(),
            value: ResourceValue::default(),
        }]);

        assert_eq!(cells(&table)[1], vec!["sunroofstatus", "-", "-"]);
    }
}
