//! The `?productIds=...&rows=N` query contract.

use std::num::NonZeroUsize;

use shared::domain::ProductId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamsError {
    #[error(
        "No product IDs specified in URL. Suggested format: ?productIds=prod_001,prod_002,prod_003&rows=3"
    )]
    MissingProductIds,
    #[error("Invalid row parameter. Use a positive number.")]
    InvalidRowCount { raw: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridParams {
    pub product_ids: Vec<ProductId>,
    pub row_count: Option<NonZeroUsize>,
}

impl GridParams {
    /// Parses a raw query string. A bad `rows` value is reported ahead of
    /// missing product ids.
    ///
    /// `rows` must be a whole positive integer; trailing text such as `3abc`
    /// is rejected rather than read as its leading digits.
    pub fn from_query(query: &str) -> Result<Self, ParamsError> {
        let query = query.strip_prefix('?').unwrap_or(query);

        let mut product_ids_raw: Option<String> = None;
        let mut rows_raw: Option<String> = None;
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "productIds" if product_ids_raw.is_none() => {
                    product_ids_raw = Some(value.into_owned())
                }
                "rows" if rows_raw.is_none() => rows_raw = Some(value.into_owned()),
                _ => {}
            }
        }

        let row_count = match rows_raw {
            Some(raw) => Some(
                raw.trim()
                    .parse::<NonZeroUsize>()
                    .map_err(|_| ParamsError::InvalidRowCount { raw })?,
            ),
            None => None,
        };

        let product_ids = product_ids_raw
            .as_deref()
            .map(split_product_ids)
            .unwrap_or_default();
        if product_ids.is_empty() {
            return Err(ParamsError::MissingProductIds);
        }

        Ok(Self {
            product_ids,
            row_count,
        })
    }

    /// Renders the parameters back into query form.
    pub fn to_query(&self) -> String {
        let ids = self
            .product_ids
            .iter()
            .map(ProductId::as_str)
            .collect::<Vec<_>>()
            .join(",");
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        serializer.append_pair("productIds", &ids);
        if let Some(rows) = self.row_count {
            serializer.append_pair("rows", &rows.to_string());
        }
        serializer.finish()
    }
}

fn split_product_ids(raw: &str) -> Vec<ProductId> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(ProductId::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ids_and_row_count() {
        let params = GridParams::from_query("?productIds=prod_001,prod_002,prod_003&rows=2")
            .expect("params");
        assert_eq!(
            params.product_ids,
            vec![
                ProductId::from("prod_001"),
                ProductId::from("prod_002"),
                ProductId::from("prod_003")
            ]
        );
        assert_eq!(params.row_count, NonZeroUsize::new(2));
    }

    #[test]
    fn rows_are_optional_and_ids_are_decoded() {
        let params = GridParams::from_query("productIds=prod_001%2C%20prod_002,,").expect("params");
        assert_eq!(params.product_ids.len(), 2);
        assert_eq!(params.product_ids[1].as_str(), "prod_002");
        assert_eq!(params.row_count, None);
    }

    #[test]
    fn missing_or_blank_ids_are_rejected() {
        assert_eq!(
            GridParams::from_query("rows=3"),
            Err(ParamsError::MissingProductIds)
        );
        assert_eq!(
            GridParams::from_query("productIds=&rows=3"),
            Err(ParamsError::MissingProductIds)
        );
        assert!(ParamsError::MissingProductIds
            .to_string()
            .starts_with("No product IDs specified in URL."));
    }

    #[test]
    fn non_positive_rows_are_rejected() {
        for raw in ["0", "-2", "abc", "1.5", "3abc", ""] {
            let err = GridParams::from_query(&format!("productIds=prod_001&rows={raw}"))
                .expect_err(raw);
            assert_eq!(err.to_string(), "Invalid row parameter. Use a positive number.");
        }
    }

    #[test]
    fn row_error_wins_over_missing_ids() {
        assert!(matches!(
            GridParams::from_query("rows=zero"),
            Err(ParamsError::InvalidRowCount { .. })
        ));
    }

    #[test]
    fn query_form_parses_back() {
        let params = GridParams::from_query("productIds=prod_004,prod_007&rows=1").expect("params");
        assert_eq!(GridParams::from_query(&params.to_query()), Ok(params));
    }
}
