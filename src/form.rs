//! The five free-text simulation parameters.
//!
//! Values are kept exactly as typed. Nothing here validates numbers; a bad
//! value is only discovered by the server.

use std::fmt;
use std::str::FromStr;

use anyhow::{Result, anyhow, bail};
use serde::{Deserialize, Serialize};

/// One of the five input fields. Names match the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    MonthlyInvestment,
    InvestmentYears,
    BondTenorYears,
    StartYear,
    StartMonth,
}

impl Field {
    /// All fields in display (and wire) order.
    pub const ALL: [Field; 5] = [
        Field::MonthlyInvestment,
        Field::InvestmentYears,
        Field::BondTenorYears,
        Field::StartYear,
        Field::StartMonth,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::MonthlyInvestment => "monthly_investment",
            Field::InvestmentYears => "investment_years",
            Field::BondTenorYears => "bond_tenor_years",
            Field::StartYear => "start_year",
            Field::StartMonth => "start_month",
        }
    }

    /// Human label, e.g. `"monthly investment"`.
    pub fn label(self) -> String {
        self.name().replace('_', " ")
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = anyhow::Error;

    /// Accepts the wire name, the label, or the kebab-case form.
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match Field::ALL.iter().find(|f| f.name() == normalized) {
            Some(field) => Ok(*field),
            None => bail!(
                "unknown field: {s} (expected one of: {})",
                Field::ALL.map(Field::name).join(", ")
            ),
        }
    }
}

/// The current form contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSet {
    pub monthly_investment: String,
    pub investment_years: String,
    pub bond_tenor_years: String,
    pub start_year: String,
    pub start_month: String,
}

impl InputSet {
    /// An all-empty form.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::MonthlyInvestment => &self.monthly_investment,
            Field::InvestmentYears => &self.investment_years,
            Field::BondTenorYears => &self.bond_tenor_years,
            Field::StartYear => &self.start_year,
            Field::StartMonth => &self.start_month,
        }
    }

    /// Overwrite exactly one field. No trimming or coercion.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::MonthlyInvestment => &mut self.monthly_investment,
            Field::InvestmentYears => &mut self.investment_years,
            Field::BondTenorYears => &mut self.bond_tenor_years,
            Field::StartYear => &mut self.start_year,
            Field::StartMonth => &mut self.start_month,
        };
        *slot = value.into();
    }

    /// Builder-style variant of [`InputSet::set_field`].
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set_field(field, value);
        self
    }

    pub fn reset_all(&mut self) {
        *self = Self::empty();
    }

    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|f| self.get(*f).is_empty())
    }

    /// `(field, value)` pairs in display order.
    pub fn entries(&self) -> impl Iterator<Item = (Field, &str)> {
        Field::ALL.into_iter().map(|f| (f, self.get(f)))
    }
}

/// Parse a REPL edit: `field=value` or `field value`.
///
/// The field may be given by label (`monthly investment 5600`). The value
/// is kept as typed after the separator and may be empty (`start_year=`
/// clears the field).
pub fn parse_assignment(input: &str) -> Result<(Field, String)> {
    let input = input.trim_start();
    if let Some((name, value)) = input.split_once('=') {
        if name.trim().is_empty() {
            bail!("expected <field>=<value>");
        }
        return Ok((name.parse()?, value.to_string()));
    }

    let input = input.trim_end();
    if let Ok(field) = input.parse::<Field>() {
        return Ok((field, String::new()));
    }
    // Longest name first, so a multi-word label wins over its first word.
    for (i, c) in input.char_indices().rev() {
        if c.is_whitespace() {
            if let Ok(field) = input[..i].parse::<Field>() {
                return Ok((field, input[i..].trim_start().to_string()));
            }
        }
    }

    match input.split_whitespace().next() {
        None => bail!("expected <field>=<value>"),
        Some(name) => Err(name
            .parse::<Field>()
            .err()
            .unwrap_or_else(|| anyhow!("expected <field> <value>"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> InputSet {
        InputSet::empty()
            .with(Field::MonthlyInvestment, "1000")
            .with(Field::InvestmentYears, "5")
            .with(Field::BondTenorYears, "10")
            .with(Field::StartYear, "2024")
            .with(Field::StartMonth, "1")
    }

    #[test]
    fn starts_empty() {
        let inputs = InputSet::empty();
        assert!(inputs.is_empty());
        for (_, value) in inputs.entries() {
            assert_eq!(value, "");
        }
    }

    #[test]
    fn set_field_touches_only_that_field() {
        for target in Field::ALL {
            let before = filled();
            let mut after = before.clone();
            after.set_field(target, "changed");

            for field in Field::ALL {
                if field == target {
                    assert_eq!(after.get(field), "changed");
                } else {
                    assert_eq!(after.get(field), before.get(field), "{field} was mutated");
                }
            }
        }
    }

    #[test]
    fn set_field_keeps_value_verbatim() {
        let mut inputs = InputSet::empty();
        inputs.set_field(Field::StartYear, "  20x4 ");
        assert_eq!(inputs.start_year, "  20x4 ");
    }

    #[test]
    fn reset_all_clears_every_field() {
        let mut inputs = filled();
        inputs.reset_all();
        assert_eq!(inputs, InputSet::empty());
        assert!(inputs.is_empty());
    }

    #[test]
    fn field_from_str_accepts_variants() {
        assert_eq!("monthly_investment".parse::<Field>().unwrap(), Field::MonthlyInvestment);
        assert_eq!("monthly investment".parse::<Field>().unwrap(), Field::MonthlyInvestment);
        assert_eq!("Bond-Tenor-Years".parse::<Field>().unwrap(), Field::BondTenorYears);
    }

    #[test]
    fn field_from_str_rejects_unknown() {
        let err = "interest_rate".parse::<Field>().unwrap_err();
        assert!(err.to_string().contains("unknown field"));
        assert!(err.to_string().contains("start_month"));
    }

    #[test]
    fn labels_replace_underscores() {
        assert_eq!(Field::BondTenorYears.label(), "bond tenor years");
    }

    #[test]
    fn serializes_all_fields_as_strings_in_order() {
        let json = serde_json::to_string(&filled().with(Field::StartMonth, "")).unwrap();
        assert_eq!(
            json,
            r#"{"monthly_investment":"1000","investment_years":"5","bond_tenor_years":"10","start_year":"2024","start_month":""}"#
        );
    }

    #[test]
    fn parse_assignment_with_equals() {
        let (field, value) = parse_assignment("start_year=2024").unwrap();
        assert_eq!(field, Field::StartYear);
        assert_eq!(value, "2024");
    }

    #[test]
    fn parse_assignment_with_space() {
        let (field, value) = parse_assignment("investment_years 5").unwrap();
        assert_eq!(field, Field::InvestmentYears);
        assert_eq!(value, "5");
    }

    #[test]
    fn parse_assignment_allows_empty_value() {
        let (field, value) = parse_assignment("start_month=").unwrap();
        assert_eq!(field, Field::StartMonth);
        assert_eq!(value, "");
    }

    #[test]
    fn parse_assignment_rejects_missing_name() {
        assert!(parse_assignment("=5").is_err());
        assert!(parse_assignment("").is_err());
    }

    #[test]
    fn parse_assignment_accepts_multi_word_label() {
        let (field, value) = parse_assignment("monthly investment 5600").unwrap();
        assert_eq!(field, Field::MonthlyInvestment);
        assert_eq!(value, "5600");

        let (field, value) = parse_assignment("bond tenor years=10").unwrap();
        assert_eq!(field, Field::BondTenorYears);
        assert_eq!(value, "10");
    }

    #[test]
    fn parse_assignment_keeps_value_as_typed() {
        let (_, value) = parse_assignment("start_year= 20x4 ").unwrap();
        assert_eq!(value, " 20x4 ");

        let (field, value) = parse_assignment("start_year 20 24").unwrap();
        assert_eq!(field, Field::StartYear);
        assert_eq!(value, "20 24");
    }

    #[test]
    fn parse_assignment_names_the_unknown_word() {
        let err = parse_assignment("monthly 5600").unwrap_err();
        assert!(err.to_string().contains("unknown field: monthly"));
    }
}
