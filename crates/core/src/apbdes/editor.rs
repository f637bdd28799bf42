//! Line-item editing for the APBDes form.
//!
//! [`KeyedList`] is the single source of truth for a repeatable list: each
//! entry gets a stable [`EntryKey`] from the list and order is position.
//! Section editors never write into the form; every edit returns freshly
//! derived totals and [`BudgetForm`] applies them to its summary.

use std::fmt;

use serde::Serialize;

use super::aggregation::{parse_amount, sum_amounts, surplus, SurplusKind};
use super::error::{AggregationError, EditorError};
use super::types::{
    BudgetPlan, FinancingFlow, FinancingLine, Pembiayaan, Rincian, Ringkasan, Rupiah, Section,
    SubRincian,
};

/// Stable identity of a list entry, unique within its list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntryKey(u64);

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct Entry<T> {
    key: EntryKey,
    value: T,
}

/// Ordered list with stable keys and a minimum length.
#[derive(Debug, Clone)]
pub struct KeyedList<T> {
    entries: Vec<Entry<T>>,
    next_key: u64,
    min_len: usize,
}

impl<T> KeyedList<T> {
    /// Builds a list from existing values.
    ///
    /// Padding up to `min_len` is done by [`KeyedList::padded`].
    pub fn from_values<I>(values: I, min_len: usize) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut list = Self {
            entries: Vec::new(),
            next_key: 0,
            min_len,
        };
        for value in values {
            list.push(value);
        }
        list
    }

    /// Appends a value and returns its key.
    pub fn push(&mut self, value: T) -> EntryKey {
        let key = EntryKey(self.next_key);
        self.next_key += 1;
        self.entries.push(Entry { key, value });
        key
    }

    /// Removes the entry at `index`.
    pub fn remove_at(&mut self, index: usize) -> Result<T, EditorError> {
        if index >= self.entries.len() {
            return Err(EditorError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        if self.entries.len() <= self.min_len {
            return Err(EditorError::MinimumEntries { min: self.min_len });
        }
        Ok(self.entries.remove(index).value)
    }

    /// Removes the entry with `key`.
    pub fn remove(&mut self, key: EntryKey) -> Result<T, EditorError> {
        let index = self.position(key).ok_or(EditorError::UnknownEntry(key))?;
        self.remove_at(index)
    }

    /// Position of `key`.
    #[must_use]
    pub fn position(&self, key: EntryKey) -> Option<usize> {
        self.entries.iter().position(|e| e.key == key)
    }

    /// Key at `index`.
    #[must_use]
    pub fn key_at(&self, index: usize) -> Option<EntryKey> {
        self.entries.get(index).map(|e| e.key)
    }

    /// Entry by key.
    #[must_use]
    pub fn get(&self, key: EntryKey) -> Option<&T> {
        self.entries.iter().find(|e| e.key == key).map(|e| &e.value)
    }

    /// Mutable entry by key.
    pub fn get_mut(&mut self, key: EntryKey) -> Result<&mut T, EditorError> {
        self.entries
            .iter_mut()
            .find(|e| e.key == key)
            .map(|e| &mut e.value)
            .ok_or(EditorError::UnknownEntry(key))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Minimum entry count.
    #[must_use]
    pub const fn min_len(&self) -> usize {
        self.min_len
    }

    /// Entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (EntryKey, &T)> {
        self.entries.iter().map(|e| (e.key, &e.value))
    }

    /// Values in order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|e| &e.value)
    }
}

impl<T: Default> KeyedList<T> {
    /// A list holding `min_len` blank entries.
    #[must_use]
    pub fn new(min_len: usize) -> Self {
        Self::padded(Vec::new(), min_len)
    }

    /// Like [`from_values`](Self::from_values), topped up with blank entries.
    pub fn padded<I>(values: I, min_len: usize) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut list = Self::from_values(values, min_len);
        while list.len() < min_len {
            list.push(T::default());
        }
        list
    }

    /// Appends a blank entry.
    pub fn push_blank(&mut self) -> EntryKey {
        self.push(T::default())
    }
}

/// Minimum entries in every editable list.
pub const MIN_ENTRIES: usize = 1;

/// Sub-item being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubItemDraft {
    /// Description.
    pub uraian: String,
    /// Parsed amount.
    pub jumlah: Rupiah,
}

/// Category being edited. Its amount is always derived from sub-items.
#[derive(Debug, Clone)]
pub struct CategoryDraft {
    /// Description.
    pub uraian: String,
    /// Sub-items.
    pub sub_items: KeyedList<SubItemDraft>,
}

impl Default for CategoryDraft {
    fn default() -> Self {
        Self {
            uraian: String::new(),
            sub_items: KeyedList::new(MIN_ENTRIES),
        }
    }
}

impl CategoryDraft {
    fn from_rincian(rincian: &Rincian) -> Self {
        let subs: Vec<SubItemDraft> = if rincian.sub_rincian.is_empty() {
            // A stored category without decomposition becomes one sub-item.
            vec![SubItemDraft {
                uraian: rincian.uraian.clone(),
                jumlah: rincian.jumlah,
            }]
        } else {
            rincian
                .sub_rincian
                .iter()
                .map(|s| SubItemDraft {
                    uraian: s.uraian.clone(),
                    jumlah: s.jumlah,
                })
                .collect()
        };
        Self {
            uraian: rincian.uraian.clone(),
            sub_items: KeyedList::padded(subs, MIN_ENTRIES),
        }
    }

    /// Sum of sub-item amounts.
    pub fn total(&self) -> Result<Rupiah, AggregationError> {
        sum_amounts(self.sub_items.values().map(|s| s.jumlah))
    }
}

/// Totals after a section edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionTotals {
    /// Per-category totals in display order.
    pub categories: Vec<(EntryKey, Rupiah)>,
    /// Section total.
    pub total: Rupiah,
}

/// Result of a section edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionChange {
    /// Key of the entry created by the edit, if any.
    pub created: Option<EntryKey>,
    /// Freshly derived totals.
    pub totals: SectionTotals,
}

/// Editor for an income or expenditure section.
#[derive(Debug, Clone)]
pub struct SectionEditor {
    categories: KeyedList<CategoryDraft>,
}

impl Default for SectionEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionEditor {
    /// One blank category with one blank sub-item.
    #[must_use]
    pub fn new() -> Self {
        Self {
            categories: KeyedList::new(MIN_ENTRIES),
        }
    }

    /// Seeds the editor from a stored section.
    #[must_use]
    pub fn from_section(section: &Section) -> Self {
        Self {
            categories: KeyedList::padded(
                section.rincian.iter().map(CategoryDraft::from_rincian),
                MIN_ENTRIES,
            ),
        }
    }

    /// Categories in order.
    #[must_use]
    pub const fn categories(&self) -> &KeyedList<CategoryDraft> {
        &self.categories
    }

    /// Derives category and section totals.
    pub fn totals(&self) -> Result<SectionTotals, AggregationError> {
        let categories = self
            .categories
            .iter()
            .map(|(key, c)| c.total().map(|t| (key, t)))
            .collect::<Result<Vec<_>, _>>()?;
        let total = sum_amounts(categories.iter().map(|(_, t)| *t))?;
        Ok(SectionTotals { categories, total })
    }

    fn changed(&self, created: Option<EntryKey>) -> Result<SectionChange, EditorError> {
        Ok(SectionChange {
            created,
            totals: self.totals()?,
        })
    }

    /// Appends a blank category.
    pub fn add_category(&mut self) -> Result<SectionChange, EditorError> {
        let key = self.categories.push_blank();
        self.changed(Some(key))
    }

    /// Removes a category; refused for the last one.
    pub fn remove_category(&mut self, category: EntryKey) -> Result<SectionChange, EditorError> {
        self.categories.remove(category)?;
        self.changed(None)
    }

    /// Appends a blank sub-item to a category.
    pub fn add_sub_item(&mut self, category: EntryKey) -> Result<SectionChange, EditorError> {
        let key = self.categories.get_mut(category)?.sub_items.push_blank();
        self.changed(Some(key))
    }

    /// Removes a sub-item; refused for the last one of its category.
    pub fn remove_sub_item(
        &mut self,
        category: EntryKey,
        sub_item: EntryKey,
    ) -> Result<SectionChange, EditorError> {
        self.categories
            .get_mut(category)?
            .sub_items
            .remove(sub_item)?;
        self.changed(None)
    }

    /// Sets a category description.
    pub fn set_category_label(
        &mut self,
        category: EntryKey,
        label: &str,
    ) -> Result<SectionChange, EditorError> {
        label.clone_into(&mut self.categories.get_mut(category)?.uraian);
        self.changed(None)
    }

    /// Sets a sub-item description.
    pub fn set_sub_item_label(
        &mut self,
        category: EntryKey,
        sub_item: EntryKey,
        label: &str,
    ) -> Result<SectionChange, EditorError> {
        let draft = self.categories.get_mut(category)?.sub_items.get_mut(sub_item)?;
        label.clone_into(&mut draft.uraian);
        self.changed(None)
    }

    /// Sets a sub-item amount from typed text (see [`parse_amount`]).
    pub fn set_sub_item_amount(
        &mut self,
        category: EntryKey,
        sub_item: EntryKey,
        input: &str,
    ) -> Result<SectionChange, EditorError> {
        let amount = parse_amount(input)?;
        self.categories
            .get_mut(category)?
            .sub_items
            .get_mut(sub_item)?
            .jumlah = amount;
        self.changed(None)
    }

    /// Builds the stored section with derived amounts.
    pub fn to_section(&self) -> Result<Section, AggregationError> {
        let rincian = self
            .categories
            .values()
            .map(|c| {
                Ok(Rincian {
                    uraian: c.uraian.clone(),
                    jumlah: c.total()?,
                    sub_rincian: c
                        .sub_items
                        .values()
                        .map(|s| SubRincian {
                            uraian: s.uraian.clone(),
                            jumlah: s.jumlah,
                        })
                        .collect(),
                })
            })
            .collect::<Result<Vec<_>, AggregationError>>()?;
        let total = sum_amounts(rincian.iter().map(|r| r.jumlah))?;
        Ok(Section { total, rincian })
    }
}

/// Financing line being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineDraft {
    /// Description.
    pub uraian: String,
    /// Parsed amount.
    pub jumlah: Rupiah,
}

/// Which financing list an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinancingSide {
    /// Financing received.
    Penerimaan,
    /// Financing paid out.
    Pengeluaran,
}

/// Totals after a financing edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FinancingTotals {
    /// Received total.
    pub penerimaan: Rupiah,
    /// Paid total.
    pub pengeluaran: Rupiah,
    /// `penerimaan - pengeluaran`.
    pub surplus: Rupiah,
}

/// Result of a financing edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinancingChange {
    /// Key of the line created by the edit, if any.
    pub created: Option<EntryKey>,
    /// Freshly derived totals.
    pub totals: FinancingTotals,
}

/// Editor for the financing section. Amounts are entered directly.
#[derive(Debug, Clone)]
pub struct FinancingEditor {
    penerimaan: KeyedList<LineDraft>,
    pengeluaran: KeyedList<LineDraft>,
}

impl Default for FinancingEditor {
    fn default() -> Self {
        Self::new()
    }
}

fn line_drafts(flow: &FinancingFlow) -> KeyedList<LineDraft> {
    KeyedList::padded(
        flow.rincian.iter().map(|l| LineDraft {
            uraian: l.uraian.clone(),
            jumlah: l.jumlah,
        }),
        MIN_ENTRIES,
    )
}

fn to_flow(lines: &KeyedList<LineDraft>) -> Result<FinancingFlow, AggregationError> {
    let rincian: Vec<FinancingLine> = lines
        .values()
        .map(|l| FinancingLine {
            uraian: l.uraian.clone(),
            jumlah: l.jumlah,
        })
        .collect();
    let total = sum_amounts(rincian.iter().map(|l| l.jumlah))?;
    Ok(FinancingFlow { total, rincian })
}

impl FinancingEditor {
    /// One blank line on each side.
    #[must_use]
    pub fn new() -> Self {
        Self {
            penerimaan: KeyedList::new(MIN_ENTRIES),
            pengeluaran: KeyedList::new(MIN_ENTRIES),
        }
    }

    /// Seeds the editor from stored financing.
    #[must_use]
    pub fn from_financing(financing: &Pembiayaan) -> Self {
        Self {
            penerimaan: line_drafts(&financing.penerimaan),
            pengeluaran: line_drafts(&financing.pengeluaran),
        }
    }

    /// Lines of one side.
    #[must_use]
    pub const fn lines(&self, side: FinancingSide) -> &KeyedList<LineDraft> {
        match side {
            FinancingSide::Penerimaan => &self.penerimaan,
            FinancingSide::Pengeluaran => &self.pengeluaran,
        }
    }

    fn lines_mut(&mut self, side: FinancingSide) -> &mut KeyedList<LineDraft> {
        match side {
            FinancingSide::Penerimaan => &mut self.penerimaan,
            FinancingSide::Pengeluaran => &mut self.pengeluaran,
        }
    }

    /// Derives both totals and the financing surplus.
    pub fn totals(&self) -> Result<FinancingTotals, AggregationError> {
        let penerimaan = sum_amounts(self.penerimaan.values().map(|l| l.jumlah))?;
        let pengeluaran = sum_amounts(self.pengeluaran.values().map(|l| l.jumlah))?;
        let surplus = penerimaan
            .checked_sub(pengeluaran)
            .ok_or(AggregationError::Overflow)?;
        Ok(FinancingTotals {
            penerimaan,
            pengeluaran,
            surplus,
        })
    }

    fn changed(&self, created: Option<EntryKey>) -> Result<FinancingChange, EditorError> {
        Ok(FinancingChange {
            created,
            totals: self.totals()?,
        })
    }

    /// Appends a blank line.
    pub fn add_line(&mut self, side: FinancingSide) -> Result<FinancingChange, EditorError> {
        let key = self.lines_mut(side).push_blank();
        self.changed(Some(key))
    }

    /// Removes a line; refused for the last one of its side.
    pub fn remove_line(
        &mut self,
        side: FinancingSide,
        line: EntryKey,
    ) -> Result<FinancingChange, EditorError> {
        self.lines_mut(side).remove(line)?;
        self.changed(None)
    }

    /// Sets a line description.
    pub fn set_line_label(
        &mut self,
        side: FinancingSide,
        line: EntryKey,
        label: &str,
    ) -> Result<FinancingChange, EditorError> {
        label.clone_into(&mut self.lines_mut(side).get_mut(line)?.uraian);
        self.changed(None)
    }

    /// Sets a line amount from typed text.
    pub fn set_line_amount(
        &mut self,
        side: FinancingSide,
        line: EntryKey,
        input: &str,
    ) -> Result<FinancingChange, EditorError> {
        let amount = parse_amount(input)?;
        self.lines_mut(side).get_mut(line)?.jumlah = amount;
        self.changed(None)
    }

    /// Builds the stored financing section.
    pub fn to_financing(&self) -> Result<Pembiayaan, AggregationError> {
        let penerimaan = to_flow(&self.penerimaan)?;
        let pengeluaran = to_flow(&self.pengeluaran)?;
        let surplus = penerimaan
            .total
            .checked_sub(pengeluaran.total)
            .ok_or(AggregationError::Overflow)?;
        Ok(Pembiayaan {
            penerimaan,
            pengeluaran,
            surplus,
        })
    }
}

/// Income or expenditure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionId {
    /// `pendapatan`.
    Pendapatan,
    /// `belanja`.
    Belanja,
}

/// The whole APBDes form.
///
/// Owns the three editors and the summary. Edits go through
/// [`edit_section`](Self::edit_section) and
/// [`edit_financing`](Self::edit_financing), which apply the totals each
/// edit returns.
#[derive(Debug, Clone)]
pub struct BudgetForm {
    tahun: i32,
    pendapatan: SectionEditor,
    belanja: SectionEditor,
    pembiayaan: FinancingEditor,
    ringkasan: Ringkasan,
}

impl BudgetForm {
    /// Empty form for a new year.
    #[must_use]
    pub fn new(tahun: i32) -> Self {
        Self {
            tahun,
            pendapatan: SectionEditor::new(),
            belanja: SectionEditor::new(),
            pembiayaan: FinancingEditor::new(),
            ringkasan: Ringkasan::default(),
        }
    }

    /// Form seeded from a stored plan, with the summary re-derived.
    pub fn from_plan(plan: &BudgetPlan) -> Result<Self, EditorError> {
        let mut form = Self {
            tahun: plan.tahun,
            pendapatan: SectionEditor::from_section(&plan.pendapatan),
            belanja: SectionEditor::from_section(&plan.belanja),
            pembiayaan: FinancingEditor::from_financing(&plan.pembiayaan),
            ringkasan: Ringkasan::default(),
        };
        let income = form.pendapatan.totals()?;
        let expense = form.belanja.totals()?;
        let financing = form.pembiayaan.totals()?;
        form.apply_section(SectionId::Pendapatan, &income)?;
        form.apply_section(SectionId::Belanja, &expense)?;
        form.apply_financing(&financing)?;
        Ok(form)
    }

    /// Budget year.
    #[must_use]
    pub const fn tahun(&self) -> i32 {
        self.tahun
    }

    /// Changes the budget year.
    pub fn set_tahun(&mut self, tahun: i32) {
        self.tahun = tahun;
    }

    /// Read access to a section editor.
    #[must_use]
    pub const fn section(&self, id: SectionId) -> &SectionEditor {
        match id {
            SectionId::Pendapatan => &self.pendapatan,
            SectionId::Belanja => &self.belanja,
        }
    }

    /// Read access to the financing editor.
    #[must_use]
    pub const fn financing(&self) -> &FinancingEditor {
        &self.pembiayaan
    }

    /// Current summary.
    #[must_use]
    pub const fn summary(&self) -> &Ringkasan {
        &self.ringkasan
    }

    /// Display class of the current surplus.
    #[must_use]
    pub const fn surplus_kind(&self) -> SurplusKind {
        SurplusKind::of(self.ringkasan.surplus)
    }

    /// Runs an edit against a section and applies the totals it returns.
    ///
    /// When the edit fails part-way, the steps it already made stay and the
    /// summary is re-derived from them before the error is returned.
    pub fn edit_section<F>(&mut self, id: SectionId, edit: F) -> Result<SectionChange, EditorError>
    where
        F: FnOnce(&mut SectionEditor) -> Result<SectionChange, EditorError>,
    {
        let editor = match id {
            SectionId::Pendapatan => &mut self.pendapatan,
            SectionId::Belanja => &mut self.belanja,
        };
        match edit(editor) {
            Ok(change) => {
                self.apply_section(id, &change.totals)?;
                Ok(change)
            }
            Err(error) => {
                let totals = self.section(id).totals()?;
                self.apply_section(id, &totals)?;
                Err(error)
            }
        }
    }

    /// Runs an edit against financing and applies the totals it returns.
    ///
    /// Partial edits are reconciled the same way as in
    /// [`edit_section`](Self::edit_section).
    pub fn edit_financing<F>(&mut self, edit: F) -> Result<FinancingChange, EditorError>
    where
        F: FnOnce(&mut FinancingEditor) -> Result<FinancingChange, EditorError>,
    {
        match edit(&mut self.pembiayaan) {
            Ok(change) => {
                self.apply_financing(&change.totals)?;
                Ok(change)
            }
            Err(error) => {
                let totals = self.pembiayaan.totals()?;
                self.apply_financing(&totals)?;
                Err(error)
            }
        }
    }

    fn apply_section(&mut self, id: SectionId, totals: &SectionTotals) -> Result<(), EditorError> {
        match id {
            SectionId::Pendapatan => self.ringkasan.pendapatan = totals.total,
            SectionId::Belanja => self.ringkasan.belanja = totals.total,
        }
        self.refresh_surplus()
    }

    fn apply_financing(&mut self, totals: &FinancingTotals) -> Result<(), EditorError> {
        self.ringkasan.pembiayaan_penerimaan = totals.penerimaan;
        self.ringkasan.pembiayaan_pengeluaran = totals.pengeluaran;
        self.refresh_surplus()
    }

    fn refresh_surplus(&mut self) -> Result<(), EditorError> {
        let r = &mut self.ringkasan;
        r.surplus = surplus(
            r.pendapatan,
            r.belanja,
            r.pembiayaan_penerimaan,
            r.pembiayaan_pengeluaran,
        )?;
        Ok(())
    }

    /// Builds the plan to submit, recomputing every total once more.
    pub fn submit(&self) -> Result<BudgetPlan, EditorError> {
        let mut plan = BudgetPlan {
            tahun: self.tahun,
            ringkasan: Ringkasan::default(),
            pendapatan: self.pendapatan.to_section()?,
            belanja: self.belanja.to_section()?,
            pembiayaan: self.pembiayaan.to_financing()?,
        };
        plan.recompute()?;
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_list_has_minimum_blank_entries() {
        let list: KeyedList<SubItemDraft> = KeyedList::new(1);
        assert_eq!(list.len(), 1);
        assert_eq!(list.values().next(), Some(&SubItemDraft::default()));
    }

    #[test]
    fn test_keys_are_stable_across_removal() {
        let mut list = KeyedList::from_values(["a", "b", "c"], 1);
        let b = list.key_at(1).unwrap();
        let c = list.key_at(2).unwrap();

        list.remove_at(0).unwrap();

        assert_eq!(list.position(b), Some(0));
        assert_eq!(list.get(c), Some(&"c"));
    }

    #[test]
    fn test_keys_are_not_reused() {
        let mut list = KeyedList::from_values([1, 2], 1);
        let removed = list.key_at(1).unwrap();
        list.remove(removed).unwrap();
        let fresh = list.push(3);
        assert_ne!(fresh, removed);
        assert_eq!(list.get(removed), None);
    }

    #[test]
    fn test_cannot_remove_below_minimum() {
        let mut list = KeyedList::from_values(["only"], 1);
        assert_eq!(list.remove_at(0), Err(EditorError::MinimumEntries { min: 1 }));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut list = KeyedList::from_values(["a", "b"], 1);
        assert_eq!(
            list.remove_at(5),
            Err(EditorError::IndexOutOfRange { index: 5, len: 2 })
        );
    }

    #[test]
    fn test_section_edits_return_totals() {
        let mut editor = SectionEditor::new();
        let cat = editor.categories().key_at(0).unwrap();
        let first = editor.categories().get(cat).unwrap().sub_items.key_at(0).unwrap();

        let change = editor.set_sub_item_amount(cat, first, "100000").unwrap();
        assert_eq!(change.totals.total, 100_000);

        let second = editor.add_sub_item(cat).unwrap().created.unwrap();
        let change = editor.set_sub_item_amount(cat, second, "50.000").unwrap();
        assert_eq!(change.totals.categories, vec![(cat, 150_000)]);
        assert_eq!(change.totals.total, 150_000);

        let change = editor.remove_sub_item(cat, first).unwrap();
        assert_eq!(change.totals.total, 50_000);

        assert_eq!(
            editor.remove_sub_item(cat, second),
            Err(EditorError::MinimumEntries { min: 1 })
        );
    }

    #[test]
    fn test_non_numeric_amount_counts_as_zero() {
        let mut editor = SectionEditor::new();
        let cat = editor.categories().key_at(0).unwrap();
        let sub = editor.categories().get(cat).unwrap().sub_items.key_at(0).unwrap();

        editor.set_sub_item_amount(cat, sub, "75000").unwrap();
        let change = editor.set_sub_item_amount(cat, sub, "tujuh").unwrap();
        assert_eq!(change.totals.total, 0);
    }

    #[test]
    fn test_fractional_amount_is_refused_and_state_kept() {
        let mut editor = SectionEditor::new();
        let cat = editor.categories().key_at(0).unwrap();
        let sub = editor.categories().get(cat).unwrap().sub_items.key_at(0).unwrap();
        editor.set_sub_item_amount(cat, sub, "1000").unwrap();

        let result = editor.set_sub_item_amount(cat, sub, "10.5");

        assert!(matches!(
            result,
            Err(EditorError::Aggregation(AggregationError::FractionalAmount(_)))
        ));
        assert_eq!(editor.totals().unwrap().total, 1_000);
    }

    #[test]
    fn test_form_applies_child_totals() {
        let mut form = BudgetForm::new(2025);

        let cat = form.section(SectionId::Pendapatan).categories().key_at(0).unwrap();
        let sub = form
            .section(SectionId::Pendapatan)
            .categories()
            .get(cat)
            .unwrap()
            .sub_items
            .key_at(0)
            .unwrap();
        form.edit_section(SectionId::Pendapatan, |e| e.set_sub_item_amount(cat, sub, "200000"))
            .unwrap();

        let cat = form.section(SectionId::Belanja).categories().key_at(0).unwrap();
        let sub = form
            .section(SectionId::Belanja)
            .categories()
            .get(cat)
            .unwrap()
            .sub_items
            .key_at(0)
            .unwrap();
        form.edit_section(SectionId::Belanja, |e| e.set_sub_item_amount(cat, sub, "250000"))
            .unwrap();

        assert_eq!(form.summary().surplus, -50_000);
        assert_eq!(form.surplus_kind(), SurplusKind::Deficit);

        let line = form.financing().lines(FinancingSide::Penerimaan).key_at(0).unwrap();
        form.edit_financing(|f| f.set_line_amount(FinancingSide::Penerimaan, line, "60000"))
            .unwrap();

        assert_eq!(form.summary().pembiayaan_penerimaan, 60_000);
        assert_eq!(form.summary().surplus, 10_000);
        assert_eq!(form.surplus_kind(), SurplusKind::Surplus);
    }

    #[test]
    fn test_submit_matches_summary() {
        let mut form = BudgetForm::new(2025);
        let cat = form.section(SectionId::Pendapatan).categories().key_at(0).unwrap();
        let sub = form
            .section(SectionId::Pendapatan)
            .categories()
            .get(cat)
            .unwrap()
            .sub_items
            .key_at(0)
            .unwrap();
        form.edit_section(SectionId::Pendapatan, |e| {
            e.set_sub_item_label(cat, sub, "Dana Desa")?;
            e.set_sub_item_amount(cat, sub, "1.000.000")
        })
        .unwrap();

        let plan = form.submit().unwrap();

        assert_eq!(plan.tahun, 2025);
        assert_eq!(plan.ringkasan, *form.summary());
        assert_eq!(plan.pendapatan.rincian[0].sub_rincian[0].uraian, "Dana Desa");
        assert!(plan.is_consistent());
    }

    #[test]
    fn test_failed_edit_keeps_summary_in_step_with_editor() {
        let mut form = BudgetForm::new(2025);
        let cat = form.section(SectionId::Pendapatan).categories().key_at(0).unwrap();
        let sub = form
            .section(SectionId::Pendapatan)
            .categories()
            .get(cat)
            .unwrap()
            .sub_items
            .key_at(0)
            .unwrap();

        let result = form.edit_section(SectionId::Pendapatan, |e| {
            e.set_sub_item_amount(cat, sub, "100000")?;
            e.set_sub_item_amount(cat, sub, "10.5")
        });

        assert!(matches!(
            result,
            Err(EditorError::Aggregation(AggregationError::FractionalAmount(_)))
        ));
        let editor_total = form.section(SectionId::Pendapatan).totals().unwrap().total;
        assert_eq!(editor_total, 100_000);
        assert_eq!(form.summary().pendapatan, 100_000);
        assert_eq!(form.summary().surplus, 100_000);
    }

    #[test]
    fn test_failed_financing_edit_keeps_summary_in_step() {
        let mut form = BudgetForm::new(2025);
        let line = form.financing().lines(FinancingSide::Pengeluaran).key_at(0).unwrap();

        let result = form.edit_financing(|f| {
            f.set_line_amount(FinancingSide::Pengeluaran, line, "40.000")?;
            f.set_line_amount(FinancingSide::Pengeluaran, line, "1,25")
        });

        assert!(result.is_err());
        assert_eq!(form.summary().pembiayaan_pengeluaran, 40_000);
        assert_eq!(form.summary().surplus, -40_000);
    }

    #[test]
    fn test_from_plan_round_trips_totals() {
        let plan = BudgetPlan {
            tahun: 2023,
            pendapatan: Section {
                total: 0,
                rincian: vec![Rincian {
                    uraian: "PAD".into(),
                    jumlah: 30_000,
                    sub_rincian: vec![],
                }],
            },
            ..BudgetPlan::default()
        };

        let form = BudgetForm::from_plan(&plan).unwrap();

        assert_eq!(form.summary().pendapatan, 30_000);
        assert_eq!(form.section(SectionId::Belanja).categories().len(), 1);
        let submitted = form.submit().unwrap();
        assert_eq!(submitted.pendapatan.total, 30_000);
        assert_eq!(submitted.pendapatan.rincian[0].sub_rincian.len(), 1);
    }
}
