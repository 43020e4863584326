//! Raw record -> numeric feature record.
//!
//! Categorical fields are looked up in fixed tables; lookups are exact, so
//! `"dsl"` or `"DSL "` are rejected just like `"DSL-Lite"`. Every other field
//! passes through unchanged once it is known to be inside its domain.

use tracing::warn;

use crate::domain::{
    Contract, InternetService, NumericFeatureRecord, PaymentMethod, RawCustomerRecord,
    TENURE_GROUP_MAX,
};
use crate::error::ChurnError;

/// `InternetService` label -> code.
///
/// Table order is display order; the form's select boxes cycle through it.
pub const INTERNET_SERVICE_CODES: [(&str, u8); 3] = [
    (InternetService::Dsl.label(), 0),
    (InternetService::FiberOptic.label(), 1),
    (InternetService::No.label(), 2),
];

/// `Contract` label -> code.
pub const CONTRACT_CODES: [(&str, u8); 3] = [
    (Contract::MonthToMonth.label(), 0),
    (Contract::OneYear.label(), 1),
    (Contract::TwoYear.label(), 2),
];

/// `PaymentMethod` label -> code.
pub const PAYMENT_METHOD_CODES: [(&str, u8); 4] = [
    (PaymentMethod::ElectronicCheck.label(), 0),
    (PaymentMethod::MailedCheck.label(), 1),
    (PaymentMethod::BankTransfer.label(), 2),
    (PaymentMethod::CreditCard.label(), 3),
];

/// Encode a raw record into the classifier's numeric schema.
///
/// Fails with `InvalidCategoricalValue` for an unknown categorical label and with
/// `InvalidFieldValue` for a numeric field outside its domain. Nothing is
/// defaulted: a failed lookup never turns into a valid code.
pub fn encode(raw: &RawCustomerRecord) -> Result<NumericFeatureRecord, ChurnError> {
    let encoded = NumericFeatureRecord {
        gender: binary("gender", raw.gender)?,
        senior_citizen: binary("SeniorCitizen", raw.senior_citizen)?,
        partner: binary("Partner", raw.partner)?,
        dependents: binary("Dependents", raw.dependents)?,
        phone_service: binary("PhoneService", raw.phone_service)?,
        multiple_lines: binary("MultipleLines", raw.multiple_lines)?,
        internet_service: lookup("InternetService", &INTERNET_SERVICE_CODES, &raw.internet_service)?,
        online_security: ternary("OnlineSecurity", raw.online_security)?,
        online_backup: ternary("OnlineBackup", raw.online_backup)?,
        device_protection: ternary("DeviceProtection", raw.device_protection)?,
        tech_support: ternary("TechSupport", raw.tech_support)?,
        streaming_tv: binary("StreamingTV", raw.streaming_tv)?,
        streaming_movies: binary("StreamingMovies", raw.streaming_movies)?,
        contract: lookup("Contract", &CONTRACT_CODES, &raw.contract)?,
        paperless_billing: binary("PaperlessBilling", raw.paperless_billing)?,
        payment_method: lookup("PaymentMethod", &PAYMENT_METHOD_CODES, &raw.payment_method)?,
        monthly_charges: charge("MonthlyCharges", raw.monthly_charges)?,
        total_charges: charge("TotalCharges", raw.total_charges)?,
        tenure_group: tenure_group(raw.tenure_group)?,
    };
    Ok(encoded)
}

/// Look up a categorical label in its table.
pub fn lookup(field: &'static str, table: &[(&str, u8)], value: &str) -> Result<u8, ChurnError> {
    table
        .iter()
        .find(|(label, _)| *label == value)
        .map(|&(_, code)| code)
        .ok_or_else(|| {
            warn!(field, value, "rejected categorical value");
            ChurnError::InvalidCategoricalValue {
                field,
                value: value.to_string(),
                expected: table
                    .iter()
                    .map(|(label, _)| *label)
                    .collect::<Vec<_>>()
                    .join(", "),
            }
        })
}

fn binary(field: &'static str, value: u8) -> Result<u8, ChurnError> {
    in_range(field, value, 1, "0 or 1")
}

fn ternary(field: &'static str, value: u8) -> Result<u8, ChurnError> {
    in_range(field, value, 2, "0, 1 or 2")
}

fn tenure_group(value: u8) -> Result<u8, ChurnError> {
    in_range("tenure_group", value, TENURE_GROUP_MAX, "an integer in 0..=6")
}

fn in_range(field: &'static str, value: u8, max: u8, expected: &'static str) -> Result<u8, ChurnError> {
    if value <= max {
        Ok(value)
    } else {
        warn!(field, value, "rejected out-of-domain value");
        Err(ChurnError::InvalidFieldValue {
            field,
            value: value.to_string(),
            expected,
        })
    }
}

fn charge(field: &'static str, value: f64) -> Result<f64, ChurnError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        warn!(field, value, "rejected out-of-domain value");
        Err(ChurnError::InvalidFieldValue {
            field,
            value: value.to_string(),
            expected: "a finite, non-negative amount",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::ValueEnum;

    fn example_record() -> RawCustomerRecord {
        RawCustomerRecord {
            internet_service: "Fiber optic".to_string(),
            contract: "Two year".to_string(),
            payment_method: "Mailed check".to_string(),
            tenure_group: 3,
            monthly_charges: 70.35,
            total_charges: 1397.5,
            ..RawCustomerRecord::default()
        }
    }

    #[test]
    fn encodes_reference_example() {
        let encoded = encode(&example_record()).unwrap();
        assert_eq!(encoded.internet_service, 1);
        assert_eq!(encoded.contract, 2);
        assert_eq!(encoded.payment_method, 1);
        assert_eq!(encoded.tenure_group, 3);
        assert_eq!(encoded.monthly_charges.to_bits(), 70.35_f64.to_bits());
        assert_eq!(encoded.total_charges.to_bits(), 1397.5_f64.to_bits());
        assert_eq!(encoded.gender, 0);
        assert_eq!(encoded.online_security, 0);
        assert_eq!(encoded.paperless_billing, 0);
    }

    #[test]
    fn every_vocabulary_label_has_its_table_code() {
        let expected_internet = [0, 1, 2];
        for (service, code) in InternetService::value_variants().iter().zip(expected_internet) {
            let raw = RawCustomerRecord {
                internet_service: service.label().to_string(),
                ..RawCustomerRecord::default()
            };
            assert_eq!(encode(&raw).unwrap().internet_service, code);
        }

        let expected_contract = [0, 1, 2];
        for (contract, code) in Contract::value_variants().iter().zip(expected_contract) {
            let raw = RawCustomerRecord {
                contract: contract.label().to_string(),
                ..RawCustomerRecord::default()
            };
            assert_eq!(encode(&raw).unwrap().contract, code);
        }

        let expected_payment = [0, 1, 2, 3];
        for (method, code) in PaymentMethod::value_variants().iter().zip(expected_payment) {
            let raw = RawCustomerRecord {
                payment_method: method.label().to_string(),
                ..RawCustomerRecord::default()
            };
            assert_eq!(encode(&raw).unwrap().payment_method, code);
        }
    }

    #[test]
    fn unknown_internet_service_is_rejected() {
        let raw = RawCustomerRecord {
            internet_service: "DSL-Lite".to_string(),
            ..example_record()
        };
        match encode(&raw) {
            Err(ChurnError::InvalidCategoricalValue { field, value, .. }) => {
                assert_eq!(field, "InternetService");
                assert_eq!(value, "DSL-Lite");
            }
            other => panic!("expected InvalidCategoricalValue, got {other:?}"),
        }
    }

    #[test]
    fn lookup_is_exact() {
        for bad in ["dsl", " DSL", "Fiber Optic", ""] {
            assert!(lookup("InternetService", &INTERNET_SERVICE_CODES, bad).is_err(), "{bad:?}");
        }
        assert!(lookup("Contract", &CONTRACT_CODES, "Month-to-month").is_err());
        assert!(lookup("PaymentMethod", &PAYMENT_METHOD_CODES, "Credit card").is_err());
    }

    #[test]
    fn out_of_domain_numbers_are_rejected() {
        let cases = [
            RawCustomerRecord { gender: 2, ..example_record() },
            RawCustomerRecord { tech_support: 3, ..example_record() },
            RawCustomerRecord { tenure_group: 7, ..example_record() },
            RawCustomerRecord { monthly_charges: -1.0, ..example_record() },
            RawCustomerRecord { total_charges: f64::NAN, ..example_record() },
        ];
        for raw in cases {
            assert!(
                matches!(encode(&raw), Err(ChurnError::InvalidFieldValue { .. })),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn pass_through_fields_are_unchanged() {
        let raw = RawCustomerRecord {
            gender: 1,
            senior_citizen: 1,
            partner: 0,
            dependents: 1,
            phone_service: 1,
            multiple_lines: 1,
            online_security: 2,
            online_backup: 1,
            device_protection: 2,
            tech_support: 1,
            streaming_tv: 1,
            streaming_movies: 0,
            paperless_billing: 1,
            monthly_charges: 0.1 + 0.2,
            total_charges: 8684.8,
            tenure_group: 6,
            ..RawCustomerRecord::default()
        };
        let encoded = encode(&raw).unwrap();
        assert_eq!(encoded.gender, raw.gender);
        assert_eq!(encoded.senior_citizen, raw.senior_citizen);
        assert_eq!(encoded.dependents, raw.dependents);
        assert_eq!(encoded.multiple_lines, raw.multiple_lines);
        assert_eq!(encoded.online_security, raw.online_security);
        assert_eq!(encoded.device_protection, raw.device_protection);
        assert_eq!(encoded.streaming_movies, raw.streaming_movies);
        assert_eq!(encoded.paperless_billing, raw.paperless_billing);
        assert_eq!(encoded.monthly_charges.to_bits(), raw.monthly_charges.to_bits());
        assert_eq!(encoded.total_charges.to_bits(), raw.total_charges.to_bits());
        assert_eq!(encoded.tenure_group, 6);
    }

    #[test]
    fn encoding_is_repeatable() {
        let raw = example_record();
        assert_eq!(encode(&raw).unwrap(), encode(&raw).unwrap());
    }

    #[test]
    fn tables_agree_with_domain_labels() {
        assert_eq!(InternetService::value_variants().len(), INTERNET_SERVICE_CODES.len());
        assert_eq!(Contract::value_variants().len(), CONTRACT_CODES.len());
        assert_eq!(PaymentMethod::value_variants().len(), PAYMENT_METHOD_CODES.len());

        for (service, (label, _)) in InternetService::value_variants().iter().zip(INTERNET_SERVICE_CODES) {
            assert_eq!(service.label(), label);
        }
        for (contract, (label, _)) in Contract::value_variants().iter().zip(CONTRACT_CODES) {
            assert_eq!(contract.label(), label);
        }
        for (method, (label, _)) in PaymentMethod::value_variants().iter().zip(PAYMENT_METHOD_CODES) {
            assert_eq!(method.label(), label);
        }

        // Codes are dense and follow table order.
        for table in [&INTERNET_SERVICE_CODES[..], &CONTRACT_CODES[..], &PAYMENT_METHOD_CODES[..]] {
            for (idx, (_, code)) in table.iter().enumerate() {
                assert_eq!(usize::from(*code), idx);
            }
        }
    }
}
