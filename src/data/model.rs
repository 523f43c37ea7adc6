use std::fmt;

use serde::Serialize;

use crate::error::LoadError;

// ---------------------------------------------------------------------------
// CellValue – a single cell of a display column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common Pandas dtypes.
///
/// Serialises as the bare JSON scalar (`"text"`, `42`, `1.5`, `true`, `null`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    /// Guess the type of a raw text cell.
    ///
    /// Digit strings with a leading zero (postal codes) and anything with a
    /// sign prefix or exponent stay text so they display as written.
    pub fn infer(raw: &str) -> Self {
        if raw.is_empty() {
            return CellValue::Null;
        }
        if raw == "true" || raw == "false" {
            return CellValue::Bool(raw == "true");
        }
        if !looks_numeric(raw) {
            return CellValue::Text(raw.to_string());
        }
        if let Ok(i) = raw.parse::<i64>() {
            return CellValue::Integer(i);
        }
        match raw.parse::<f64>() {
            Ok(f) if f.is_finite() => CellValue::Float(f),
            _ => CellValue::Text(raw.to_string()),
        }
    }

    /// Type-guess a text cell with [`CellValue::infer`]; other cells pass
    /// through.
    pub fn inferred(self) -> Self {
        match self {
            CellValue::Text(raw) => CellValue::infer(&raw),
            other => other,
        }
    }

    /// Interpret the value as an `f64`, parsing text if needed.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Text(s) => s.trim().parse().ok(),
            CellValue::Bool(_) | CellValue::Null => None,
        }
    }
}

fn looks_numeric(raw: &str) -> bool {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    let mut chars = digits.chars();
    match (chars.next(), chars.next()) {
        (None, _) => return false,
        (Some('0'), Some(c)) if c.is_ascii_digit() => return false,
        _ => {}
    }
    digits.chars().all(|c| c.is_ascii_digit() || c == '.')
}

// ---------------------------------------------------------------------------
// Field – what a source column means
// ---------------------------------------------------------------------------

/// The role of a source column.  Known columns map onto [`Venue`] fields,
/// everything else is carried along as an extra display column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    VendorName,
    Sector,
    Price,
    Latitude,
    Longitude,
    Region,
    Country,
    PostalCode,
    /// Index into [`Venue::extra`].
    Extra(usize),
}

impl Field {
    /// Columns a dataset cannot be loaded without.
    pub const REQUIRED: [Field; 5] = [
        Field::Sector,
        Field::Price,
        Field::Latitude,
        Field::Longitude,
        Field::VendorName,
    ];

    /// Match a header against the known fields.
    ///
    /// Comparison ignores case, spaces, `_` and `-`, so `vendor name`,
    /// `vendorName` and `vendor_name` are the same column.
    pub fn from_header(header: &str) -> Option<Field> {
        let key: String = header
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "vendorname" => Some(Field::VendorName),
            "sector" => Some(Field::Sector),
            "price" => Some(Field::Price),
            "latitude" => Some(Field::Latitude),
            "longitude" => Some(Field::Longitude),
            "region" => Some(Field::Region),
            "country" => Some(Field::Country),
            "postalcode" => Some(Field::PostalCode),
            _ => None,
        }
    }

    /// Canonical column name used in error messages.
    pub fn canonical_name(self) -> &'static str {
        match self {
            Field::VendorName => "vendorName",
            Field::Sector => "sector",
            Field::Price => "price",
            Field::Latitude => "latitude",
            Field::Longitude => "longitude",
            Field::Region => "region",
            Field::Country => "country",
            Field::PostalCode => "postalCode",
            Field::Extra(_) => "extra",
        }
    }

    /// Location and address columns are kept on the record but not listed
    /// in the venue table.
    pub fn shown_in_table(self) -> bool {
        !matches!(
            self,
            Field::Region | Field::Country | Field::PostalCode | Field::Latitude | Field::Longitude
        )
    }
}

/// One column of the source schema, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Header exactly as written in the source file.
    pub name: String,
    pub field: Field,
}

// ---------------------------------------------------------------------------
// Venue – one row of the source table
// ---------------------------------------------------------------------------

/// A single venue listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Venue {
    pub vendor_name: String,
    pub sector: String,
    pub price: f64,
    pub latitude: f64,
    pub longitude: f64,
    /// Empty when the source has no `region` column.
    pub region: String,
    pub country: String,
    pub postal_code: String,
    /// Unrecognised columns, aligned with the `Field::Extra` indices of the
    /// dataset schema.
    pub extra: Vec<CellValue>,
}

impl Venue {
    /// The value of a column as a display cell.
    pub fn cell(&self, field: Field) -> CellValue {
        match field {
            Field::VendorName => CellValue::Text(self.vendor_name.clone()),
            Field::Sector => CellValue::Text(self.sector.clone()),
            Field::Price => CellValue::Float(self.price),
            Field::Latitude => CellValue::Float(self.latitude),
            Field::Longitude => CellValue::Float(self.longitude),
            Field::Region => CellValue::Text(self.region.clone()),
            Field::Country => CellValue::Text(self.country.clone()),
            Field::PostalCode => CellValue::Text(self.postal_code.clone()),
            Field::Extra(i) => self.extra.get(i).cloned().unwrap_or(CellValue::Null),
        }
    }
}

// ---------------------------------------------------------------------------
// RawTable – loader output before typing
// ---------------------------------------------------------------------------

/// Headers plus rows, as produced by the format-specific readers.
///
/// CSV cells arrive as raw text; Parquet and JSON cells keep their native
/// types.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset.  Read-only once built.
#[derive(Debug, Clone)]
pub struct Dataset {
    venues: Vec<Venue>,
    columns: Vec<Column>,
    /// Distinct sectors in order of first appearance.
    sectors: Vec<String>,
}

impl Dataset {
    /// Resolve the schema of `table` and type every row.
    ///
    /// Fails if a required column is missing, a required numeric cell does
    /// not hold a finite number, or there are no rows at all.
    pub fn from_table(table: RawTable) -> Result<Self, LoadError> {
        let columns = resolve_columns(&table.headers);

        for required in Field::REQUIRED {
            if !columns.iter().any(|c| c.field == required) {
                return Err(LoadError::MissingColumn {
                    column: required.canonical_name(),
                });
            }
        }

        if table.rows.is_empty() {
            return Err(LoadError::NoRecords);
        }

        let n_extra = columns
            .iter()
            .filter(|c| matches!(c.field, Field::Extra(_)))
            .count();

        let mut venues = Vec::with_capacity(table.rows.len());
        for (row_idx, cells) in table.rows.into_iter().enumerate() {
            venues.push(build_venue(&columns, cells, row_idx + 1, n_extra)?);
        }

        let mut sectors: Vec<String> = Vec::new();
        for venue in &venues {
            if !sectors.contains(&venue.sector) {
                sectors.push(venue.sector.clone());
            }
        }

        Ok(Dataset {
            venues,
            columns,
            sectors,
        })
    }

    /// All venues in source order.
    pub fn venues(&self) -> &[Venue] {
        &self.venues
    }

    /// Source schema in file order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Distinct sector values in order of first appearance.
    pub fn sectors(&self) -> &[String] {
        &self.sectors
    }

    pub fn has_sector(&self, sector: &str) -> bool {
        self.sectors.iter().any(|s| s == sector)
    }

    /// Columns listed in the venue table.
    pub fn table_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.field.shown_in_table())
    }

    /// Number of venues.
    pub fn len(&self) -> usize {
        self.venues.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }
}

fn resolve_columns(headers: &[String]) -> Vec<Column> {
    let mut columns: Vec<Column> = Vec::with_capacity(headers.len());
    let mut n_extra = 0;
    for header in headers {
        let field = match Field::from_header(header) {
            Some(f) if !columns.iter().any(|c| c.field == f) => f,
            _ => {
                n_extra += 1;
                Field::Extra(n_extra - 1)
            }
        };
        columns.push(Column {
            name: header.clone(),
            field,
        });
    }
    columns
}

fn build_venue(
    columns: &[Column],
    cells: Vec<CellValue>,
    row: usize,
    n_extra: usize,
) -> Result<Venue, LoadError> {
    let mut venue = Venue {
        vendor_name: String::new(),
        sector: String::new(),
        price: 0.0,
        latitude: 0.0,
        longitude: 0.0,
        region: String::new(),
        country: String::new(),
        postal_code: String::new(),
        extra: vec![CellValue::Null; n_extra],
    };

    let mut cells = cells.into_iter();
    for column in columns {
        // Short rows read as nulls; the required-number check below catches
        // the ones that matter.
        let cell = cells.next().unwrap_or(CellValue::Null);
        match column.field {
            Field::VendorName => venue.vendor_name = cell.to_string(),
            Field::Sector => venue.sector = cell.to_string(),
            Field::Region => venue.region = cell.to_string(),
            Field::Country => venue.country = cell.to_string(),
            Field::PostalCode => venue.postal_code = cell.to_string(),
            Field::Price => venue.price = required_number(&cell, row, column)?,
            Field::Latitude => venue.latitude = required_number(&cell, row, column)?,
            Field::Longitude => venue.longitude = required_number(&cell, row, column)?,
            Field::Extra(i) => venue.extra[i] = cell.inferred(),
        }
    }
    Ok(venue)
}

fn required_number(cell: &CellValue, row: usize, column: &Column) -> Result<f64, LoadError> {
    match cell.as_f64() {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(LoadError::InvalidValue {
            row,
            column: column.name.clone(),
            value: cell.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn table(headers: &[&str], rows: Vec<Vec<CellValue>>) -> RawTable {
        RawTable {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows,
        }
    }

    #[test]
    fn infer_keeps_postal_codes_with_leading_zeros_as_text() {
        assert_eq!(CellValue::infer("01234"), text("01234"));
        assert_eq!(CellValue::infer("90012"), CellValue::Integer(90012));
        assert_eq!(CellValue::infer("2500.5"), CellValue::Float(2500.5));
        assert_eq!(CellValue::infer("2500.50"), CellValue::Float(2500.5));
        assert_eq!(CellValue::infer(""), CellValue::Null);
        assert_eq!(CellValue::infer("true"), CellValue::Bool(true));
        assert_eq!(CellValue::infer("Pasadena"), text("Pasadena"));
    }

    #[test]
    fn header_matching_ignores_case_and_separators() {
        assert_eq!(Field::from_header("vendor name"), Some(Field::VendorName));
        assert_eq!(Field::from_header("vendorName"), Some(Field::VendorName));
        assert_eq!(Field::from_header("Vendor_Name"), Some(Field::VendorName));
        assert_eq!(Field::from_header("postal code"), Some(Field::PostalCode));
        assert_eq!(Field::from_header("rating"), None);
    }

    #[test]
    fn duplicate_known_header_becomes_extra() {
        let columns = resolve_columns(&["price".into(), "Price".into(), "notes".into()]);
        assert_eq!(columns[0].field, Field::Price);
        assert_eq!(columns[1].field, Field::Extra(0));
        assert_eq!(columns[2].field, Field::Extra(1));
    }

    #[test]
    fn sectors_keep_first_appearance_order() {
        let row = |sector: &str| {
            vec![
                text("V"),
                text(sector),
                CellValue::Integer(100),
                CellValue::Float(34.0),
                CellValue::Float(-118.0),
            ]
        };
        let ds = Dataset::from_table(table(
            &["vendor name", "sector", "price", "latitude", "longitude"],
            vec![row("Florists"), row("Banquet Halls"), row("Florists")],
        ))
        .unwrap();
        assert_eq!(ds.sectors(), ["Florists", "Banquet Halls"]);
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn missing_required_column_is_reported_by_canonical_name() {
        let err = Dataset::from_table(table(
            &["vendor name", "sector", "latitude", "longitude"],
            vec![],
        ))
        .unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn { column: "price" }));
    }

    #[test]
    fn null_price_is_invalid() {
        let err = Dataset::from_table(table(
            &["vendor name", "sector", "price", "latitude", "longitude"],
            vec![vec![
                text("V"),
                text("Florists"),
                CellValue::Null,
                CellValue::Float(34.0),
                CellValue::Float(-118.0),
            ]],
        ))
        .unwrap_err();
        match err {
            LoadError::InvalidValue { row, column, .. } => {
                assert_eq!(row, 1);
                assert_eq!(column, "price");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
