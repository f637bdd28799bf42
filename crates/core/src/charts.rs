//! Chart-ready series for the public pages.
//!
//! Shares are given in basis points (1/100 of a percent) so that no
//! floating point is involved; `2534` reads as 25.34%.

use serde::Serialize;

use crate::apbdes::{BudgetPlan, Rupiah};
use crate::demography::{Demographics, LabelCount};

/// Suggested widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Pie or donut.
    Pie,
    /// Bar.
    Bar,
}

/// One slice or bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    /// Label.
    pub label: String,
    /// Value.
    pub value: i64,
    /// Share of the series total in basis points.
    pub share_bp: i64,
}

/// A named series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    /// Stable key for the client.
    pub key: &'static str,
    /// Heading.
    pub title: &'static str,
    /// Suggested widget.
    pub kind: ChartKind,
    /// Points in source order.
    pub points: Vec<ChartPoint>,
}

/// Share of `value` in `total`, in basis points, rounded half up.
#[must_use]
pub fn share_bp(value: i64, total: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    let scaled = i128::from(value) * 10_000;
    let total = i128::from(total);
    let rounded = (scaled * 2 + total) / (total * 2);
    i64::try_from(rounded).unwrap_or(i64::MAX)
}

fn series<I>(key: &'static str, title: &'static str, kind: ChartKind, values: I) -> ChartSeries
where
    I: IntoIterator<Item = (String, i64)>,
{
    let values: Vec<(String, i64)> = values.into_iter().collect();
    let total = values
        .iter()
        .fold(0_i64, |acc, (_, v)| acc.saturating_add(*v));
    ChartSeries {
        key,
        title,
        kind,
        points: values
            .into_iter()
            .map(|(label, value)| ChartPoint {
                share_bp: share_bp(value, total),
                label,
                value,
            })
            .collect(),
    }
}

fn counts(list: &[LabelCount]) -> impl Iterator<Item = (String, i64)> + '_ {
    list.iter().map(|c| (c.label.clone(), c.jumlah))
}

/// Income pie, expenditure bars and summary bars.
#[must_use]
pub fn budget_charts(plan: &BudgetPlan) -> Vec<ChartSeries> {
    let r = &plan.ringkasan;
    let summary: [(&str, Rupiah); 4] = [
        ("Pendapatan", r.pendapatan),
        ("Belanja", r.belanja),
        ("Penerimaan Pembiayaan", r.pembiayaan_penerimaan),
        ("Pengeluaran Pembiayaan", r.pembiayaan_pengeluaran),
    ];

    vec![
        series(
            "pendapatan",
            "Komposisi Pendapatan",
            ChartKind::Pie,
            plan.pendapatan
                .rincian
                .iter()
                .map(|c| (c.uraian.clone(), c.jumlah)),
        ),
        series(
            "belanja",
            "Belanja per Bidang",
            ChartKind::Bar,
            plan.belanja
                .rincian
                .iter()
                .map(|c| (c.uraian.clone(), c.jumlah)),
        ),
        series(
            "ringkasan",
            "Ringkasan APBDes",
            ChartKind::Bar,
            summary.into_iter().map(|(l, v)| (l.to_string(), v)),
        ),
    ]
}

/// Gender per hamlet and every breakdown table.
#[must_use]
pub fn demographic_charts(data: &Demographics) -> Vec<ChartSeries> {
    vec![
        series(
            "dusun_laki_laki",
            "Penduduk Laki-laki per Dusun",
            ChartKind::Bar,
            data.dusun.iter().map(|d| (d.nama.clone(), d.laki_laki)),
        ),
        series(
            "dusun_perempuan",
            "Penduduk Perempuan per Dusun",
            ChartKind::Bar,
            data.dusun.iter().map(|d| (d.nama.clone(), d.perempuan)),
        ),
        series("kelompok_umur", "Kelompok Umur", ChartKind::Bar, counts(&data.kelompok_umur)),
        series("pendidikan", "Pendidikan", ChartKind::Bar, counts(&data.pendidikan)),
        series("pekerjaan", "Pekerjaan", ChartKind::Bar, counts(&data.pekerjaan)),
        series("wajib_pilih", "Wajib Pilih", ChartKind::Pie, counts(&data.wajib_pilih)),
        series("perkawinan", "Status Perkawinan", ChartKind::Pie, counts(&data.perkawinan)),
        series("agama", "Agama", ChartKind::Pie, counts(&data.agama)),
    ]
}
