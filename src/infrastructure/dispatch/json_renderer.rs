use async_trait::async_trait;
use serde::Serialize;
use std::path::PathBuf;

use crate::domain::invoice::{Customer, DispatchError, DocumentRenderer, Invoice, RenderedDocument};

#[derive(Serialize)]
struct DocumentLine<'a> {
  description: &'a str,
  quantity: String,
  rate: String,
  amount: String,
}

#[derive(Serialize)]
struct InvoiceDocument<'a> {
  invoice_number: &'a str,
  status: &'a str,
  customer_name: &'a str,
  customer_email: Option<&'a str>,
  customer_address: Option<&'a str>,
  currency_symbol: &'a str,
  items: Vec<DocumentLine<'a>>,
  subtotal: String,
  tax_amount: String,
  discount: String,
  total: String,
  advance_paid: String,
  remaining: String,
  issued_at: String,
}

/// Serializes a read-only invoice snapshot and keeps a copy in `output_dir`.
pub struct JsonDocumentRenderer {
  output_dir: PathBuf,
  currency_symbol: String,
}

impl JsonDocumentRenderer {
  pub fn new(output_dir: PathBuf, currency_symbol: String) -> Self {
    Self {
      output_dir,
      currency_symbol,
    }
  }

  fn failed(reason: impl ToString) -> DispatchError {
    DispatchError::Failed {
      channel: "Document",
      reason: reason.to_string(),
    }
  }
}

#[async_trait]
impl DocumentRenderer for JsonDocumentRenderer {
  async fn render(
    &self,
    invoice: &Invoice,
    customer: &Customer,
  ) -> Result<RenderedDocument, DispatchError> {
    let document = InvoiceDocument {
      invoice_number: invoice.invoice_number.value(),
      status: invoice.status.as_str(),
      customer_name: customer.name.value(),
      customer_email: customer.email.as_deref(),
      customer_address: customer.address.as_deref(),
      currency_symbol: &self.currency_symbol,
      items: invoice
        .line_items
        .iter()
        .map(|item| DocumentLine {
          description: item.description.value(),
          quantity: item.quantity.value().normalize().to_string(),
          rate: item.rate.amount().to_string(),
          amount: item.line_total().amount().to_string(),
        })
        .collect(),
      subtotal: invoice.subtotal.amount().to_string(),
      tax_amount: invoice.tax_amount.amount().to_string(),
      discount: invoice.discount.amount().to_string(),
      total: invoice.total.amount().to_string(),
      advance_paid: invoice.advance_paid.amount().to_string(),
      remaining: invoice.remaining.amount().to_string(),
      issued_at: invoice.created_at.format("%Y-%m-%d").to_string(),
    };

    let bytes = serde_json::to_vec_pretty(&document).map_err(Self::failed)?;
    let file_name = format!("invoice_{}.json", invoice.invoice_number.value());

    tokio::fs::create_dir_all(&self.output_dir)
      .await
      .map_err(Self::failed)?;
    tokio::fs::write(self.output_dir.join(&file_name), &bytes)
      .await
      .map_err(Self::failed)?;

    tracing::debug!(invoice_id = %invoice.id, file = %file_name, "Invoice document rendered");

    Ok(RenderedDocument {
      file_name,
      content_type: "application/json",
      bytes,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::invoice::{CustomerName, InvoiceNumber, LineItem, LineItemDescription};
  use crate::domain::ledger::{Money, Quantity};
  use rust_decimal_macros::dec;
  use uuid::Uuid;

  #[tokio::test]
  async fn test_render_writes_snapshot() {
    let owner = Uuid::new_v4();
    let customer = Customer::new(
      owner,
      CustomerName::new("Asha Traders".to_string()).unwrap(),
      Some("asha@example.com".to_string()),
      None,
      None,
    );
    let invoice = Invoice::new(
      owner,
      customer.id,
      InvoiceNumber::from_sequence(7),
      vec![LineItem::new(
        LineItemDescription::new("Filing".to_string()).unwrap(),
        Quantity::new(dec!(2)).unwrap(),
        Money::new(dec!(150)).unwrap(),
      )],
      Money::zero(),
    );
    let dir = std::env::temp_dir().join(format!("billdesk-render-{}", Uuid::new_v4()));
    let renderer = JsonDocumentRenderer::new(dir.clone(), "₹".to_string());

    let document = renderer.render(&invoice, &customer).await.unwrap();

    assert_eq!(document.file_name, "invoice_INV-000007.json");
    let json: serde_json::Value = serde_json::from_slice(&document.bytes).unwrap();
    assert_eq!(json["customer_name"], "Asha Traders");
    assert_eq!(json["total"], "300.00");
    assert!(dir.join(&document.file_name).exists());

    std::fs::remove_dir_all(dir).ok();
  }
}
