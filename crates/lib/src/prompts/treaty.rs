use crate::types::{ExampleData, Extraction};

pub const TREATY_PROMPT: &str = "You are a senior underwriter in a reinsurance company and an excellent linguist.
You extract structured fields from treaty documents in markdown format within non-life reinsurance.
Use exact substrings from the source (no paraphrasing).
If a value is missing, omit it.
Use only the categories defined within examples.";

/// A complete motor excess of loss slip. Lines wrapped in the source
/// document are joined so every example extraction is a verbatim substring.
const SLIP_EXAMPLE: &str = "Slip 1
Risk Details
UMR:
A661997MP00001
TYPE:
Motor Excess of Loss Reinsurance
REINSURED:
HYDROBIUS INSURANCE AND REINSURANCE S.A., Athens, Greece
PERIOD:
Losses occurring during the period commencing 12 months from 1st January 2024 to 31st December 2024 both days inclusive Local Standard Time at place where loss occurs.
CLASS OF BUSINESS:
Business in respect of Motor Insurances covering Third Party Bodily Injury, Third Party Material Damage, Passengers Liability, including Green Cards and losses resulting from Presidential Decree 1019.
TERRITORIAL SCOPE:
Business underwritten in the territory of Greece but extended to cover European Union countries, Switzerland, Green Cards and Presidential Decree 1019.
LIMITS & RETENTIONS:
1st Layer
EUR 3,000,000 Ultimate Net Loss each and every accident or loss or series of accidents or losses arising out of one event in excess of:
EUR 2,000,000 Ultimate Net Loss each and every accident or loss or series of accidents or losses arising out of one event.
2nd Layer
EUR 45,000,000 Ultimate Net Loss each and every accident or loss or series of accidents or losses arising out of one event in excess of:
EUR 5,000,000 Ultimate Net Loss each and every accident or loss or series of accidents or losses arising out of one event.
3rd Layer
Unlimited Ultimate Net Loss each and every accident or loss or series of accidents or losses arising out of one event in excess of:
EUR 50,000,000 Ultimate Net Loss each and every accident or loss or series of accidents or losses arising out of one event.
PREMIUM:
1st Layer
Minimum & Deposit: EUR 115,440
Premium payable in four equal instalments of EUR 28,860 each at 1st January 2024, 1st April 2024, 1st July 2024 and 1st October 2024 subject to LSW3000 (60 days) per each instalment.
2nd Layer
Minimum & Deposit: EUR 88,800
Premium payable in four equal instalments of EUR 22,200 each at 1st January 2024, 1st April 2024, 1st July 2024 and 1st October 2024 subject to LSW3000 (60 days) per each instalment.
3rd Layer
Minimum & Deposit: EUR 47,360
Premium payable in four equal instalments of EUR 11,840 each at 1st January 2024, 1st April 2024, 1st July 2024 and 1st October 2024 subject to LSW3000 (60 days) per each instalment.
The term ‘Gross Net Premium Income’ shall mean the original gross premium written by the Reinsured, in respect of the business covered hereunder, less return premiums and less the premiums for outwards reinsurance, recoveries under which inure to the benefit of reinsurers hereon.
PREMIUM PAYMENT TERMS:
The (Re)Insured undertakes that premium will be paid in full to Reinsurers within 60 days of inception of this policy (or, in respect of instalment premiums, when due).
ESTIMATED PREMIUM INCOME:
Estimated Premium Income for the period 01/01/2024 - 31/12/2024:
EUR 36,000,000
TAXES PAYABLE BY THE REINSURED & ADMINISTERED BY UNDERWRITERS:
None
CONDITIONS:
•  Reinsurance Clause
•  Ultimate Net Loss Clause
•  Net Retained Lines Clause
•  Premium Clause
•  Premium Processing Clause LSW3003 - 14/12/09
•  Claims Reporting and Co-Operation Clause
•  Loss Settlements Clause
•  Currency Conversion Clause
•  Apportionment Clause
•  Change In Law Clause
•  Local Jurisdiction Clause
•  Special Cancellation Clause
•  Limits and Retentions Clause
•  Extended Expiration Clause
•  Amendments and Alterations Clause";

/// The clauses listed under CONDITIONS, in slip order.
const CLAUSES: &[&str] = &[
    "Reinsurance Clause",
    "Ultimate Net Loss Clause",
    "Net Retained Lines Clause",
    "Premium Clause",
    "Premium Processing Clause LSW3003 - 14/12/09",
    "Claims Reporting and Co-Operation Clause",
    "Loss Settlements Clause",
    "Currency Conversion Clause",
    "Apportionment Clause",
    "Change In Law Clause",
    "Local Jurisdiction Clause",
    "Special Cancellation Clause",
    "Limits and Retentions Clause",
    "Extended Expiration Clause",
    "Amendments and Alterations Clause",
];

const INSTALMENT_DATES: &str =
    "1st January 2024, 1st April 2024, 1st July 2024 and 1st October 2024";

/// Premium extractions for one layer: deposit, instalment count, amount and dates.
fn layer_premium(layer: &str, deposit: &str, instalment: &str) -> Vec<Extraction> {
    [
        (deposit, "minimum & deposit amount"),
        ("four", "instalments"),
        (instalment, "instalment amount"),
        (INSTALMENT_DATES, "instalment dates"),
    ]
    .into_iter()
    .map(|(text, part)| {
        Extraction::new("premium", text)
            .with_attribute("part", part)
            .with_attribute("layer", layer)
    })
    .collect()
}

pub fn examples() -> Vec<ExampleData> {
    let mut extractions = vec![
        Extraction::new("umr_nr", "A661997MP00001"),
        Extraction::new("reinsurance_type", "Motor Excess of Loss Reinsurance"),
        Extraction::new(
            "company",
            "HYDROBIUS INSURANCE AND REINSURANCE S.A., Athens, Greece",
        )
        .with_attribute("role", "cedent"),
        Extraction::new("period", "12 months").with_attribute("type", "duration"),
        Extraction::new("period", "1st January 2024").with_attribute("type", "start"),
        Extraction::new("period", "31st December 2024").with_attribute("type", "end"),
        Extraction::new("class_of_business", "Motor Insurances").with_attribute("type", "business"),
        Extraction::new(
            "class_of_business",
            "Third Party Bodily Injury, Third Party Material Damage, Passengers Liability, including Green Cards and losses resulting from Presidential Decree 1019",
        )
        .with_attribute("type", "coverage"),
        Extraction::new("territory", "Greece").with_attribute("type", "main"),
        Extraction::new(
            "territory",
            "European Union countries, Switzerland, Green Cards and Presidential Decree 1019",
        )
        .with_attribute("type", "extended"),
        Extraction::new("limits", "EUR 3,000,000").with_attribute("layer", "1st"),
        Extraction::new("retentions", "EUR 2,000,000").with_attribute("layer", "1st"),
        Extraction::new("limits", "EUR 45,000,000").with_attribute("layer", "2nd"),
        Extraction::new("retentions", "EUR 5,000,000").with_attribute("layer", "2nd"),
        Extraction::new("limits", "Unlimited").with_attribute("layer", "3rd"),
        Extraction::new("retentions", "EUR 50,000,000").with_attribute("layer", "3rd"),
    ];

    extractions.extend(layer_premium("1st", "EUR 115,440", "EUR 28,860"));
    extractions.extend(layer_premium("2nd", "EUR 88,800", "EUR 22,200"));
    extractions.extend(layer_premium("3rd", "EUR 47,360", "EUR 11,840"));

    extractions.extend([
        Extraction::new("premium_terms", "within 60 days of inception of this policy"),
        Extraction::new("estimated_premium_income", "01/01/2024").with_attribute("part", "start"),
        Extraction::new("estimated_premium_income", "31/12/2024").with_attribute("part", "end"),
        Extraction::new("estimated_premium_income", "EUR 36,000,000")
            .with_attribute("part", "amount"),
        Extraction::new("taxes", "None"),
    ]);
    extractions.extend(
        CLAUSES
            .iter()
            .map(|clause| Extraction::new("conditions", *clause).with_attribute("type", "clause")),
    );

    vec![ExampleData::new(SLIP_EXAMPLE, extractions)]
}
