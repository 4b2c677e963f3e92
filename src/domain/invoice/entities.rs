use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ledger::{Money, Payable, PaymentState, TaxRate, apply_payment};

use super::errors::InvoiceError;
use super::line_items::{LineItem, subtotal};
use super::value_objects::{CustomerName, InvoiceNumber, InvoiceStatus};

// Customer - contact details owned by one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
  pub id: Uuid,
  pub owner_id: Uuid,
  pub name: CustomerName,
  pub email: Option<String>,
  pub phone: Option<String>,
  pub whatsapp: Option<String>,
  pub address: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Customer {
  /// The contact number is stored as both phone and WhatsApp number.
  pub fn new(
    owner_id: Uuid,
    name: CustomerName,
    email: Option<String>,
    contact: Option<String>,
    address: Option<String>,
  ) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      owner_id,
      name,
      email,
      phone: contact.clone(),
      whatsapp: contact,
      address,
      created_at: now,
      updated_at: now,
    }
  }

  pub fn update_contact(
    &mut self,
    name: CustomerName,
    email: Option<String>,
    contact: Option<String>,
  ) {
    self.name = name;
    self.email = email;
    self.phone = contact.clone();
    self.whatsapp = contact;
    self.updated_at = Utc::now();
  }
}

// Invoice - line items plus a payment ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
  pub id: Uuid,
  pub owner_id: Uuid,
  pub customer_id: Uuid,
  pub invoice_number: InvoiceNumber,
  pub line_items: Vec<LineItem>,
  pub tax_rate: TaxRate,
  pub discount: Money,
  pub advance_paid: Money,
  pub subtotal: Money,
  pub tax_amount: Money,
  pub total: Money,
  pub remaining: Money,
  pub status: InvoiceStatus,
  pub notes: String,
  pub due_date: Option<NaiveDate>,
  pub email_sent: bool,
  pub whatsapp_sent: bool,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  pub paid_at: Option<DateTime<Utc>>,
}

impl Invoice {
  /// Creates a draft. Tax, discount, notes and due date always start empty.
  pub fn new(
    owner_id: Uuid,
    customer_id: Uuid,
    invoice_number: InvoiceNumber,
    line_items: Vec<LineItem>,
    advance_paid: Money,
  ) -> Self {
    let now = Utc::now();
    let mut invoice = Self {
      id: Uuid::new_v4(),
      owner_id,
      customer_id,
      invoice_number,
      line_items,
      tax_rate: TaxRate::zero(),
      discount: Money::zero(),
      advance_paid,
      subtotal: Money::zero(),
      tax_amount: Money::zero(),
      total: Money::zero(),
      remaining: Money::zero(),
      status: InvoiceStatus::Draft,
      notes: String::new(),
      due_date: None,
      email_sent: false,
      whatsapp_sent: false,
      created_at: now,
      updated_at: now,
      paid_at: None,
    };
    invoice.calculate_totals();
    invoice
  }

  /// Recomputes every derived amount from line items, tax rate, discount and
  /// advance. Idempotent.
  pub fn calculate_totals(&mut self) {
    self.subtotal = subtotal(&self.line_items);
    self.tax_amount = self.subtotal.percent(self.tax_rate);
    self.total = self
      .subtotal
      .add(self.tax_amount)
      .saturating_sub(self.discount);
    self.remaining = self.total.saturating_sub(self.advance_paid);
  }

  pub fn set_adjustments(&mut self, tax_rate: TaxRate, discount: Money) {
    self.tax_rate = tax_rate;
    self.discount = discount;
    self.calculate_totals();
    self.updated_at = Utc::now();
  }

  /// Replaces the item set and resets the simplified-flow fields. Advance and
  /// status are left as they are.
  pub fn replace_details(&mut self, line_items: Vec<LineItem>) -> Result<(), InvoiceError> {
    if self.status == InvoiceStatus::Paid {
      return Err(InvoiceError::CannotEditPaid);
    }

    self.line_items = line_items;
    self.tax_rate = TaxRate::zero();
    self.discount = Money::zero();
    self.notes = String::new();
    self.due_date = None;
    self.calculate_totals();
    self.updated_at = Utc::now();
    Ok(())
  }

  pub fn change_status(
    &mut self,
    new_status: InvoiceStatus,
    at: DateTime<Utc>,
  ) -> Result<(), InvoiceError> {
    if !self.status.can_transition_to(new_status) {
      return Err(InvoiceError::InvalidStatusTransition {
        from: self.status,
        to: new_status,
      });
    }

    if new_status == InvoiceStatus::Paid {
      self.mark_paid(at);
    } else {
      self.status = new_status;
      self.updated_at = at;
    }
    Ok(())
  }

  /// Forces the invoice to paid regardless of the outstanding balance.
  pub fn mark_paid(&mut self, at: DateTime<Utc>) {
    self.status = InvoiceStatus::Paid;
    self.advance_paid = self.total;
    self.remaining = Money::zero();
    self.paid_at = Some(at);
    self.updated_at = at;
  }

  pub fn record_payment(
    &mut self,
    amount: Decimal,
    at: DateTime<Utc>,
  ) -> Result<PaymentState, InvoiceError> {
    if self.status == InvoiceStatus::Cancelled {
      return Err(InvoiceError::CannotPayCancelled);
    }
    Ok(apply_payment(self, amount, at)?)
  }

  pub fn ensure_deletable(&self) -> Result<(), InvoiceError> {
    if self.status == InvoiceStatus::Paid {
      return Err(InvoiceError::CannotDeletePaid);
    }
    Ok(())
  }

  /// Independent draft copy with the same items and amounts but no payments.
  pub fn duplicate(&self, invoice_number: InvoiceNumber) -> Invoice {
    let now = Utc::now();
    let mut copy = Invoice {
      id: Uuid::new_v4(),
      invoice_number,
      line_items: self.line_items.clone(),
      advance_paid: Money::zero(),
      status: InvoiceStatus::Draft,
      email_sent: false,
      whatsapp_sent: false,
      created_at: now,
      updated_at: now,
      paid_at: None,
      ..self.clone()
    };
    copy.calculate_totals();
    copy
  }

  /// Records a successful dispatch. A draft becomes sent.
  pub fn mark_dispatched(&mut self, email: bool, whatsapp: bool) {
    self.email_sent |= email;
    self.whatsapp_sent |= whatsapp;
    if self.status == InvoiceStatus::Draft {
      self.status = InvoiceStatus::Sent;
    }
    self.updated_at = Utc::now();
  }
}

impl Payable for Invoice {
  fn total(&self) -> Money {
    self.total
  }

  fn advance_paid(&self) -> Money {
    self.advance_paid
  }

  fn settle_payment(
    &mut self,
    advance_paid: Money,
    remaining: Money,
    state: PaymentState,
    at: DateTime<Utc>,
  ) {
    self.advance_paid = advance_paid;
    self.remaining = remaining;
    match state {
      PaymentState::Paid => {
        self.status = InvoiceStatus::Paid;
        self.paid_at.get_or_insert(at);
      }
      PaymentState::Partial => self.status = InvoiceStatus::Sent,
      PaymentState::Pending => {}
    }
    self.updated_at = at;
  }
}
