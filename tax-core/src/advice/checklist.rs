use crate::models::EmploymentCategory;

const COMMON_DOCUMENTS: &[&str] = &[
    "PAN Card",
    "Aadhaar Card",
    "Bank Account Statements",
    "Form 26AS",
    "Annual Information Statement (AIS)",
];

fn category_documents(category: EmploymentCategory) -> &'static [&'static str] {
    match category {
        EmploymentCategory::Salaried => &[
            "Form 16 from employer",
            "Salary certificates",
            "HRA rent receipts and agreement",
            "Investment proofs (80C, 80D, etc.)",
            "Interest certificate from banks",
        ],
        EmploymentCategory::Freelancer => &[
            "Professional income receipts",
            "Expense vouchers",
            "TDS certificates from clients",
            "Business registration documents",
        ],
        EmploymentCategory::Business => &[
            "Business income statements",
            "Profit & Loss account",
            "Balance sheet",
            "Expense receipts",
            "GST returns",
        ],
        EmploymentCategory::Rental => &[
            "Property documents",
            "Rent receipts",
            "Municipal tax receipts",
            "Home loan interest certificate",
            "Property tax receipts",
        ],
        EmploymentCategory::Investor => &[
            "Share trading statements",
            "Dividend income certificates",
            "Interest income statements",
            "Capital gains statements",
            "Mutual fund statements",
        ],
    }
}

/// Documents to gather before filing: the common set, then those specific
/// to `category`.
pub fn document_checklist(category: EmploymentCategory) -> Vec<&'static str> {
    COMMON_DOCUMENTS
        .iter()
        .chain(category_documents(category))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn common_documents_come_first() {
        let docs = document_checklist(EmploymentCategory::Investor);

        assert_eq!(&docs[..5], COMMON_DOCUMENTS);
        assert_eq!(docs[5], "Share trading statements");
    }

    #[test]
    fn every_category_has_specific_documents() {
        for category in EmploymentCategory::all() {
            assert!(document_checklist(*category).len() > COMMON_DOCUMENTS.len());
        }
    }

    #[test]
    fn salaried_needs_form_16() {
        assert!(document_checklist(EmploymentCategory::Salaried).contains(&"Form 16 from employer"));
    }
}
