//! Form state for the terminal UI.
//!
//! Kept free of any terminal types so it can be driven from tests. Every widget
//! only produces values inside its field's domain, so a record built here is
//! always accepted by the encoder.

use crate::domain::{RawCustomerRecord, TENURE_GROUP_MAX};
use crate::encode::{CONTRACT_CODES, INTERNET_SERVICE_CODES, PAYMENT_METHOD_CODES};

const BINARY: &[u8] = &[0, 1];
const TERNARY: &[u8] = &[0, 1, 2];

/// Step used by ←/→ on amount fields.
const AMOUNT_STEP: f64 = 1.0;

/// Form sections, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Customer,
    Services,
    Billing,
    Action,
}

impl Section {
    pub const INPUTS: [Section; 3] = [Section::Customer, Section::Services, Section::Billing];

    pub fn title(self) -> &'static str {
        match self {
            Section::Customer => "Customer Information",
            Section::Services => "Services",
            Section::Billing => "Billing Information",
            Section::Action => "",
        }
    }
}

/// What kind of widget a field uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Widget {
    /// Horizontal radio over small integer codes.
    Radio(&'static [u8]),
    /// Select box over an encoder table (label, code).
    Select(&'static [(&'static str, u8)]),
    /// Bounded integer input.
    Stepper { max: u8 },
    /// Non-negative amount; typed in or stepped.
    Amount,
    Button,
}

/// Every focusable element of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Gender,
    SeniorCitizen,
    Partner,
    Dependents,
    TenureGroup,
    PaperlessBilling,
    PhoneService,
    MultipleLines,
    InternetService,
    OnlineSecurity,
    OnlineBackup,
    DeviceProtection,
    TechSupport,
    StreamingTv,
    StreamingMovies,
    Contract,
    PaymentMethod,
    MonthlyCharges,
    TotalCharges,
    Predict,
}

impl Field {
    /// Focus order.
    pub const ALL: [Field; 20] = [
        Field::Gender,
        Field::SeniorCitizen,
        Field::Partner,
        Field::Dependents,
        Field::TenureGroup,
        Field::PaperlessBilling,
        Field::PhoneService,
        Field::MultipleLines,
        Field::InternetService,
        Field::OnlineSecurity,
        Field::OnlineBackup,
        Field::DeviceProtection,
        Field::TechSupport,
        Field::StreamingTv,
        Field::StreamingMovies,
        Field::Contract,
        Field::PaymentMethod,
        Field::MonthlyCharges,
        Field::TotalCharges,
        Field::Predict,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Gender => "Gender",
            Field::SeniorCitizen => "Senior Citizen",
            Field::Partner => "Partner",
            Field::Dependents => "Dependents",
            Field::TenureGroup => "Tenure Group",
            Field::PaperlessBilling => "Paperless Billing",
            Field::PhoneService => "Phone Service",
            Field::MultipleLines => "Multiple Lines",
            Field::InternetService => "Internet Service",
            Field::OnlineSecurity => "Online Security",
            Field::OnlineBackup => "Online Backup",
            Field::DeviceProtection => "Device Protection",
            Field::TechSupport => "Tech Support",
            Field::StreamingTv => "Streaming TV",
            Field::StreamingMovies => "Streaming Movies",
            Field::Contract => "Contract",
            Field::PaymentMethod => "Payment Method",
            Field::MonthlyCharges => "Monthly Charges",
            Field::TotalCharges => "Total Charges",
            Field::Predict => "Predict Churn",
        }
    }

    pub fn section(self) -> Section {
        match self {
            Field::Gender
            | Field::SeniorCitizen
            | Field::Partner
            | Field::Dependents
            | Field::TenureGroup
            | Field::PaperlessBilling => Section::Customer,
            Field::PhoneService
            | Field::MultipleLines
            | Field::InternetService
            | Field::OnlineSecurity
            | Field::OnlineBackup
            | Field::DeviceProtection
            | Field::TechSupport
            | Field::StreamingTv
            | Field::StreamingMovies => Section::Services,
            Field::Contract | Field::PaymentMethod | Field::MonthlyCharges | Field::TotalCharges => {
                Section::Billing
            }
            Field::Predict => Section::Action,
        }
    }

    pub fn widget(self) -> Widget {
        match self {
            Field::OnlineSecurity | Field::OnlineBackup | Field::DeviceProtection | Field::TechSupport => {
                Widget::Radio(TERNARY)
            }
            Field::InternetService => Widget::Select(&INTERNET_SERVICE_CODES),
            Field::Contract => Widget::Select(&CONTRACT_CODES),
            Field::PaymentMethod => Widget::Select(&PAYMENT_METHOD_CODES),
            Field::TenureGroup => Widget::Stepper { max: TENURE_GROUP_MAX },
            Field::MonthlyCharges | Field::TotalCharges => Widget::Amount,
            Field::Predict => Widget::Button,
            _ => Widget::Radio(BINARY),
        }
    }

    /// Fields belonging to `section`, in focus order.
    pub fn in_section(section: Section) -> impl Iterator<Item = Field> {
        Field::ALL.into_iter().filter(move |f| f.section() == section)
    }
}

/// Editable form backed by a `RawCustomerRecord`.
#[derive(Debug, Clone)]
pub struct Form {
    record: RawCustomerRecord,
    selected: usize,
    editing: Option<String>,
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}

impl Form {
    pub fn new() -> Self {
        Self {
            record: RawCustomerRecord::default(),
            selected: 0,
            editing: None,
        }
    }

    pub fn record(&self) -> &RawCustomerRecord {
        &self.record
    }

    pub fn selected(&self) -> Field {
        Field::ALL[self.selected]
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < Field::ALL.len() {
            self.selected += 1;
        }
    }

    pub fn select(&mut self, field: Field) {
        if let Some(idx) = Field::ALL.iter().position(|f| *f == field) {
            self.selected = idx;
        }
    }

    /// Move the selected widget's value by `delta` steps. Returns whether the
    /// value changed.
    pub fn adjust(&mut self, delta: i32) -> bool {
        let field = self.selected();
        match field.widget() {
            Widget::Radio(options) => {
                let cur = self.code(field);
                let idx = options.iter().position(|o| *o == cur).unwrap_or(0);
                let next = options[cycle(idx, options.len(), delta)];
                self.set_code(field, next);
                next != cur
            }
            Widget::Select(options) => {
                let cur = self.text(field).to_string();
                let idx = options.iter().position(|(label, _)| *label == cur).unwrap_or(0);
                let (next, _) = options[cycle(idx, options.len(), delta)];
                self.set_text(field, next);
                next != cur
            }
            Widget::Stepper { max } => {
                let cur = self.code(field);
                let next = if delta >= 0 {
                    cur.saturating_add(1).min(max)
                } else {
                    cur.saturating_sub(1)
                };
                self.set_code(field, next);
                next != cur
            }
            Widget::Amount => {
                let cur = self.amount(field);
                let next = (cur + AMOUNT_STEP * f64::from(delta)).max(0.0);
                self.set_amount(field, next);
                next != cur
            }
            Widget::Button => false,
        }
    }

    /// Start typing into an amount field. Returns `false` for other widgets.
    pub fn begin_edit(&mut self) -> bool {
        let field = self.selected();
        if field.widget() != Widget::Amount {
            return false;
        }
        self.editing = Some(format_amount(self.amount(field)));
        true
    }

    pub fn edit_buffer(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn edit_push(&mut self, c: char) {
        if let Some(buf) = &mut self.editing {
            if c.is_ascii_digit() || (c == '.' && !buf.contains('.')) {
                buf.push(c);
            }
        }
    }

    pub fn edit_pop(&mut self) {
        if let Some(buf) = &mut self.editing {
            buf.pop();
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Apply the typed amount. An empty buffer means `0`.
    pub fn commit_edit(&mut self) -> Result<f64, String> {
        let Some(buf) = self.editing.take() else {
            return Err("Not editing.".to_string());
        };
        let trimmed = buf.trim();
        let value = if trimmed.is_empty() {
            0.0
        } else {
            trimmed
                .parse::<f64>()
                .map_err(|e| format!("Invalid amount '{trimmed}': {e}"))?
        };
        if !(value.is_finite() && value >= 0.0) {
            return Err(format!("Invalid amount '{trimmed}': must be non-negative"));
        }
        self.set_amount(self.selected(), value);
        Ok(value)
    }

    /// Back to the initial state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Display text for a field's current value.
    pub fn value_text(&self, field: Field) -> String {
        match field.widget() {
            Widget::Radio(options) => {
                let cur = self.code(field);
                options
                    .iter()
                    .map(|o| if *o == cur { format!("({o})") } else { format!(" {o} ") })
                    .collect::<Vec<_>>()
                    .join(" ")
            }
            Widget::Select(_) => format!("‹ {} ›", self.text(field)),
            Widget::Stepper { max } => format!("‹ {} › (0-{max})", self.code(field)),
            Widget::Amount => {
                if self.selected() == field {
                    if let Some(buf) = &self.editing {
                        return format!("{buf}_");
                    }
                }
                format_amount(self.amount(field))
            }
            Widget::Button => String::new(),
        }
    }

    fn code(&self, field: Field) -> u8 {
        let r = &self.record;
        match field {
            Field::Gender => r.gender,
            Field::SeniorCitizen => r.senior_citizen,
            Field::Partner => r.partner,
            Field::Dependents => r.dependents,
            Field::TenureGroup => r.tenure_group,
            Field::PaperlessBilling => r.paperless_billing,
            Field::PhoneService => r.phone_service,
            Field::MultipleLines => r.multiple_lines,
            Field::OnlineSecurity => r.online_security,
            Field::OnlineBackup => r.online_backup,
            Field::DeviceProtection => r.device_protection,
            Field::TechSupport => r.tech_support,
            Field::StreamingTv => r.streaming_tv,
            Field::StreamingMovies => r.streaming_movies,
            _ => 0,
        }
    }

    fn set_code(&mut self, field: Field, value: u8) {
        let r = &mut self.record;
        let slot = match field {
            Field::Gender => &mut r.gender,
            Field::SeniorCitizen => &mut r.senior_citizen,
            Field::Partner => &mut r.partner,
            Field::Dependents => &mut r.dependents,
            Field::TenureGroup => &mut r.tenure_group,
            Field::PaperlessBilling => &mut r.paperless_billing,
            Field::PhoneService => &mut r.phone_service,
            Field::MultipleLines => &mut r.multiple_lines,
            Field::OnlineSecurity => &mut r.online_security,
            Field::OnlineBackup => &mut r.online_backup,
            Field::DeviceProtection => &mut r.device_protection,
            Field::TechSupport => &mut r.tech_support,
            Field::StreamingTv => &mut r.streaming_tv,
            Field::StreamingMovies => &mut r.streaming_movies,
            _ => return,
        };
        *slot = value;
    }

    fn text(&self, field: Field) -> &str {
        match field {
            Field::InternetService => &self.record.internet_service,
            Field::Contract => &self.record.contract,
            Field::PaymentMethod => &self.record.payment_method,
            _ => "",
        }
    }

    fn set_text(&mut self, field: Field, value: &str) {
        let slot = match field {
            Field::InternetService => &mut self.record.internet_service,
            Field::Contract => &mut self.record.contract,
            Field::PaymentMethod => &mut self.record.payment_method,
            _ => return,
        };
        *slot = value.to_string();
    }

    fn amount(&self, field: Field) -> f64 {
        match field {
            Field::MonthlyCharges => self.record.monthly_charges,
            Field::TotalCharges => self.record.total_charges,
            _ => 0.0,
        }
    }

    fn set_amount(&mut self, field: Field, value: f64) {
        match field {
            Field::MonthlyCharges => self.record.monthly_charges = value,
            Field::TotalCharges => self.record.total_charges = value,
            _ => {}
        }
    }
}

fn cycle(idx: usize, len: usize, delta: i32) -> usize {
    let len = len as i64;
    (idx as i64 + i64::from(delta)).rem_euclid(len) as usize
}

fn format_amount(v: f64) -> String {
    format!("{v:.2}")
}
