//! Decoding of url-encoded invoice forms whose line items arrive as sparse,
//! index-keyed fields such as `items[3][rate]=120`.

use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;

use super::dtos::{InvoiceRequest, LineItemRequest};
use super::errors::ApiError;

/// Splits `items[<index>][<field>]` into its index and field name.
fn item_key(key: &str) -> Option<(u64, &str)> {
  let rest = key.strip_prefix("items[")?;
  let (index, rest) = rest.split_once("][")?;
  let field = rest.strip_suffix(']')?;
  Some((index.parse().ok()?, field))
}

fn non_empty(value: String) -> Option<String> {
  if value.trim().is_empty() {
    None
  } else {
    Some(value)
  }
}

/// Builds an invoice request from a form body. Rows keep the order in which
/// their index first appears in the body, and missing indices are simply
/// absent. Row values stay text so that bad numbers only drop their own row.
pub fn decode_invoice_form(body: &[u8]) -> Result<InvoiceRequest, ApiError> {
  let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body)
    .map_err(|e| ApiError::Validation(format!("Malformed form body: {}", e)))?;

  let mut request = InvoiceRequest::default();
  let mut rows: Vec<LineItemRequest> = Vec::new();
  let mut positions: HashMap<u64, usize> = HashMap::new();

  for (key, value) in pairs {
    if let Some((index, field)) = item_key(&key) {
      let position = *positions.entry(index).or_insert_with(|| {
        rows.push(LineItemRequest::default());
        rows.len() - 1
      });
      let row = &mut rows[position];
      match field {
        "description" => row.description = Some(value),
        "quantity" => row.quantity = non_empty(value),
        "rate" => row.rate = non_empty(value),
        _ => {}
      }
      continue;
    }

    match key.as_str() {
      "customer_name" => request.customer_name = value,
      "customer_email" => request.customer_email = non_empty(value),
      "customer_contact" => request.customer_contact = non_empty(value),
      "customer_address" => request.customer_address = non_empty(value),
      "advance_paid" | "advance_amount" => {
        request.advance_paid = match value.trim() {
          "" => Decimal::ZERO,
          raw => Decimal::from_str(raw)
            .map_err(|_| ApiError::Validation(format!("Invalid advance amount: {}", raw)))?,
        }
      }
      _ => {}
    }
  }

  // Only rows that carried a description field were submitted as items
  request.items = rows
    .into_iter()
    .filter(|row| row.description.is_some())
    .collect();
  Ok(request)
}
