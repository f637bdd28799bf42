//! Total derivation for APBDes documents.
//!
//! A category decomposed into sub-items takes the sum of its sub-items; a
//! section total is the sum of its categories; financing lines are entered
//! directly. All sums are checked.

use serde::Serialize;

use super::error::AggregationError;
use super::types::{
    BudgetPlan, FinancingFlow, FinancingLine, Pembiayaan, Rincian, Rupiah, Section, SubRincian,
};

/// Checked sum.
pub fn sum_amounts<I>(amounts: I) -> Result<Rupiah, AggregationError>
where
    I: IntoIterator<Item = Rupiah>,
{
    amounts
        .into_iter()
        .try_fold(0_i64, |acc, amount| acc.checked_add(amount))
        .ok_or(AggregationError::Overflow)
}

/// Sum of sub-item amounts.
pub fn category_total(sub_items: &[SubRincian]) -> Result<Rupiah, AggregationError> {
    sum_amounts(sub_items.iter().map(|s| s.jumlah))
}

/// Amount of a category: derived from sub-items when it has any.
pub fn category_amount(category: &Rincian) -> Result<Rupiah, AggregationError> {
    if category.sub_rincian.is_empty() {
        Ok(category.jumlah)
    } else {
        category_total(&category.sub_rincian)
    }
}

/// Sum of category amounts. Independent of category order.
pub fn section_total(categories: &[Rincian]) -> Result<Rupiah, AggregationError> {
    categories
        .iter()
        .try_fold(0_i64, |acc, category| {
            acc.checked_add(category_amount(category)?)
                .ok_or(AggregationError::Overflow)
        })
}

/// Rewrites every category amount and the section total. Returns the total.
pub fn recompute_section(section: &mut Section) -> Result<Rupiah, AggregationError> {
    for category in &mut section.rincian {
        category.jumlah = category_amount(category)?;
    }
    section.total = sum_amounts(section.rincian.iter().map(|c| c.jumlah))?;
    Ok(section.total)
}

/// Sum of directly entered financing amounts.
pub fn financing_total(lines: &[FinancingLine]) -> Result<Rupiah, AggregationError> {
    sum_amounts(lines.iter().map(|l| l.jumlah))
}

fn recompute_flow(flow: &mut FinancingFlow) -> Result<Rupiah, AggregationError> {
    flow.total = financing_total(&flow.rincian)?;
    Ok(flow.total)
}

/// Rewrites both financing totals and the financing surplus.
pub fn recompute_financing(financing: &mut Pembiayaan) -> Result<(), AggregationError> {
    let received = recompute_flow(&mut financing.penerimaan)?;
    let paid = recompute_flow(&mut financing.pengeluaran)?;
    financing.surplus = received
        .checked_sub(paid)
        .ok_or(AggregationError::Overflow)?;
    Ok(())
}

/// `income - expense + received - paid`.
///
/// This is the only place the overall surplus is computed.
pub fn surplus(
    income: Rupiah,
    expense: Rupiah,
    received: Rupiah,
    paid: Rupiah,
) -> Result<Rupiah, AggregationError> {
    income
        .checked_sub(expense)
        .and_then(|v| v.checked_add(received))
        .and_then(|v| v.checked_sub(paid))
        .ok_or(AggregationError::Overflow)
}

/// Display class of a surplus figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SurplusKind {
    /// Zero or positive.
    Surplus,
    /// Negative.
    Deficit,
}

impl SurplusKind {
    /// Classifies an amount; zero counts as a surplus.
    #[must_use]
    pub const fn of(amount: Rupiah) -> Self {
        if amount >= 0 { Self::Surplus } else { Self::Deficit }
    }

    /// Indonesian label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Surplus => "Surplus",
            Self::Deficit => "Defisit",
        }
    }
}

impl BudgetPlan {
    /// Re-derives every total, the financing surplus and the summary.
    pub fn recompute(&mut self) -> Result<(), AggregationError> {
        let income = recompute_section(&mut self.pendapatan)?;
        let expense = recompute_section(&mut self.belanja)?;
        recompute_financing(&mut self.pembiayaan)?;

        let received = self.pembiayaan.penerimaan.total;
        let paid = self.pembiayaan.pengeluaran.total;

        self.ringkasan.pendapatan = income;
        self.ringkasan.belanja = expense;
        self.ringkasan.pembiayaan_penerimaan = received;
        self.ringkasan.pembiayaan_pengeluaran = paid;
        self.ringkasan.surplus = surplus(income, expense, received, paid)?;
        Ok(())
    }

    /// True when stored totals match what [`recompute`](Self::recompute) derives.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let mut derived = self.clone();
        derived.recompute().is_ok() && derived == *self
    }

    /// Display class of the overall surplus.
    #[must_use]
    pub const fn surplus_kind(&self) -> SurplusKind {
        SurplusKind::of(self.ringkasan.surplus)
    }
}

/// Parses an amount typed into a form field.
///
/// Empty or non-numeric text counts as zero. Thousands separators (`.` or
/// `,` followed by exactly three digits) are accepted, so `1.500.000` is one
/// and a half million. Anything that still has a fractional part is
/// rejected.
pub fn parse_amount(input: &str) -> Result<Rupiah, AggregationError> {
    let raw = input.trim();
    let text = raw
        .strip_prefix("Rp")
        .or_else(|| raw.strip_prefix("rp"))
        .map_or(raw, str::trim_start);

    if text.is_empty() {
        return Ok(0);
    }

    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, text),
    };

    let numeric = body.starts_with(|c: char| c.is_ascii_digit())
        && body.bytes().all(|b| b.is_ascii_digit() || b == b'.' || b == b',');
    if !numeric {
        return Ok(0);
    }

    let groups: Vec<&str> = body.split(['.', ',']).collect();
    let grouped =
        groups.len() > 1 && groups[0].len() <= 3 && groups[1..].iter().all(|g| g.len() == 3);

    let digits: String = if groups.len() == 1 || grouped {
        groups.concat()
    } else {
        let fraction = groups[1..].concat();
        if fraction.bytes().all(|b| b == b'0') && groups.len() == 2 {
            groups[0].to_string()
        } else {
            return Err(AggregationError::FractionalAmount(raw.to_string()));
        }
    };

    if digits.is_empty() {
        return Ok(0);
    }

    let value: Rupiah = digits.parse().map_err(|_| AggregationError::Overflow)?;
    if negative && value != 0 {
        return Err(AggregationError::NegativeAmount(raw.to_string()));
    }
    Ok(value)
}

/// Formats an amount as `Rp 1.500.000` (`-Rp 500` when negative).
#[must_use]
pub fn format_rupiah(amount: Rupiah) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-Rp {grouped}")
    } else {
        format!("Rp {grouped}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sub(jumlah: Rupiah) -> SubRincian {
        SubRincian {
            uraian: "item".into(),
            jumlah,
        }
    }

    fn category(subs: &[Rupiah]) -> Rincian {
        Rincian {
            uraian: "kategori".into(),
            jumlah: 0,
            sub_rincian: subs.iter().copied().map(sub).collect(),
        }
    }

    fn line(jumlah: Rupiah) -> FinancingLine {
        FinancingLine {
            uraian: "baris".into(),
            jumlah,
        }
    }

    #[rstest]
    #[case("", 0)]
    #[case("   ", 0)]
    #[case("abc", 0)]
    #[case("12a", 0)]
    #[case("150000", 150_000)]
    #[case(" 150000 ", 150_000)]
    #[case("1.500.000", 1_500_000)]
    #[case("1,500,000", 1_500_000)]
    #[case("Rp 25.000", 25_000)]
    #[case("25000,00", 25_000)]
    #[case("0", 0)]
    #[case("-0", 0)]
    fn test_parse_amount_accepts(#[case] input: &str, #[case] expected: Rupiah) {
        assert_eq!(parse_amount(input), Ok(expected));
    }

    #[rstest]
    #[case("1500.5")]
    #[case("12,75")]
    #[case("1.5")]
    #[case("1.500.00")]
    fn test_parse_amount_rejects_fraction(#[case] input: &str) {
        assert!(matches!(
            parse_amount(input),
            Err(AggregationError::FractionalAmount(_))
        ));
    }

    #[test]
    fn test_parse_amount_rejects_negative() {
        assert!(matches!(
            parse_amount("-5000"),
            Err(AggregationError::NegativeAmount(_))
        ));
    }

    #[test]
    fn test_parse_amount_overflow() {
        assert_eq!(
            parse_amount("99999999999999999999"),
            Err(AggregationError::Overflow)
        );
    }

    #[test]
    fn test_category_without_sub_items_keeps_amount() {
        let mut section = Section {
            total: 0,
            rincian: vec![Rincian {
                uraian: "Bagi hasil pajak".into(),
                jumlah: 40_000,
                sub_rincian: vec![],
            }],
        };
        assert_eq!(recompute_section(&mut section), Ok(40_000));
        assert_eq!(section.rincian[0].jumlah, 40_000);
    }

    #[test]
    fn test_worked_example() {
        let mut plan = BudgetPlan {
            tahun: 2024,
            pendapatan: Section {
                total: 0,
                rincian: vec![category(&[100_000, 50_000]), category(&[25_000])],
            },
            belanja: Section {
                total: 0,
                rincian: vec![category(&[100_000])],
            },
            pembiayaan: Pembiayaan {
                penerimaan: FinancingFlow {
                    total: 0,
                    rincian: vec![line(20_000)],
                },
                pengeluaran: FinancingFlow {
                    total: 0,
                    rincian: vec![line(5_000)],
                },
                surplus: 0,
            },
            ..BudgetPlan::default()
        };

        plan.recompute().unwrap();

        assert_eq!(plan.pendapatan.rincian[0].jumlah, 150_000);
        assert_eq!(plan.pendapatan.rincian[1].jumlah, 25_000);
        assert_eq!(plan.pendapatan.total, 175_000);
        assert_eq!(plan.pembiayaan.surplus, 15_000);
        assert_eq!(plan.ringkasan.surplus, 90_000);
        assert_eq!(plan.surplus_kind(), SurplusKind::Surplus);
        assert!(plan.is_consistent());
    }

    #[test]
    fn test_all_zero_is_surplus() {
        assert_eq!(surplus(0, 0, 0, 0), Ok(0));
        assert_eq!(SurplusKind::of(0), SurplusKind::Surplus);
        assert_eq!(SurplusKind::of(-1), SurplusKind::Deficit);
    }

    #[test]
    fn test_stale_totals_are_inconsistent() {
        let mut plan = BudgetPlan {
            tahun: 2024,
            pendapatan: Section {
                total: 0,
                rincian: vec![category(&[10])],
            },
            ..BudgetPlan::default()
        };
        assert!(!plan.is_consistent());
        plan.recompute().unwrap();
        assert!(plan.is_consistent());
    }

    #[test]
    fn test_overflow_is_reported() {
        let section = vec![category(&[i64::MAX]), category(&[1])];
        assert_eq!(section_total(&section), Err(AggregationError::Overflow));
    }

    #[rstest]
    #[case(0, "Rp 0")]
    #[case(500, "Rp 500")]
    #[case(1_500_000, "Rp 1.500.000")]
    #[case(-90_000, "-Rp 90.000")]
    fn test_format_rupiah(#[case] amount: Rupiah, #[case] expected: &str) {
        assert_eq!(format_rupiah(amount), expected);
    }
}
