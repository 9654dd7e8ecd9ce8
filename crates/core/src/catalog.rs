//! Caller-side management of the part and stock collections.
//!
//! These helpers mirror what an interactive front end does before handing
//! plain data to the optimizer: batch entry of comma-separated lengths,
//! automatic part naming, grouping by length and removal by group.

use crate::config::OptimizerConfig;
use crate::error::{ensure_positive, Error, Result};
use crate::model::{Part, PartId, StockId, StockPiece};
use crate::naming::column_name;
use crate::optimizer::Optimizer;
use crate::plan::Plan;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parses a single length or a comma-separated batch of lengths.
///
/// A lone value must be a positive number. In a batch, entries that are not
/// positive numbers are skipped; the batch fails only if none remain.
pub fn parse_lengths(input: &str) -> Result<Vec<f64>> {
    let entries: Vec<&str> = input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    match entries.as_slice() {
        [] => Err(Error::invalid("no length given")),
        [single] => {
            let value = parse_length(single)
                .ok_or_else(|| Error::invalid(format!("'{single}' is not a valid length")))?;
            Ok(vec![value])
        }
        many => {
            let values: Vec<f64> = many.iter().filter_map(|s| parse_length(s)).collect();
            if values.is_empty() {
                Err(Error::invalid("no valid measurements found in batch input"))
            } else {
                Ok(values)
            }
        }
    }
}

fn parse_length(s: &str) -> Option<f64> {
    s.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

/// Parts sharing one length.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LengthGroup {
    /// Common length.
    pub length: f64,
    /// Number of parts with this length.
    pub quantity: usize,
}

fn group_lengths(lengths: impl Iterator<Item = f64>) -> Vec<LengthGroup> {
    let mut groups: Vec<LengthGroup> = Vec::new();
    for length in lengths {
        match groups.iter_mut().find(|g| g.length == length) {
            Some(group) => group.quantity += 1,
            None => groups.push(LengthGroup {
                length,
                quantity: 1,
            }),
        }
    }
    groups.sort_by(|a, b| a.length.total_cmp(&b.length));
    groups
}

/// Stock pieces sharing one length and one kind.
///
/// Default-length and custom pieces of equal length form separate groups.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StockGroup {
    /// Common length.
    pub length: f64,
    /// Whether the pieces are default-length stock.
    pub is_default: bool,
    /// Number of pieces in the group.
    pub quantity: usize,
}

impl StockGroup {
    fn matches(&self, piece: &StockPiece) -> bool {
        piece.length == self.length && piece.is_default == self.is_default
    }
}

/// The parts required for a job.
#[derive(Debug, Clone, Default)]
pub struct PartList {
    parts: Vec<Part>,
    next_id: u64,
}

impl PartList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` parts for every length in `input`.
    ///
    /// Names follow creation order (`A`, `B`, ..., `Z`, `AA`, ...) based on
    /// the number of parts already in the list. Returns the new parts.
    pub fn add(&mut self, input: &str, quantity: usize) -> Result<&[Part]> {
        if quantity == 0 {
            return Err(Error::invalid("quantity must be at least 1"));
        }
        let lengths = parse_lengths(input)?;

        let start = self.parts.len();
        for length in lengths {
            for _ in 0..quantity {
                self.push(length);
            }
        }
        Ok(&self.parts[start..])
    }

    /// Adds a single part of `length`.
    pub fn add_length(&mut self, length: f64) -> Result<&Part> {
        ensure_positive("part length", length)?;
        self.push(length);
        Ok(&self.parts[self.parts.len() - 1])
    }

    fn push(&mut self, length: f64) {
        self.next_id += 1;
        let name = column_name(self.parts.len());
        self.parts
            .push(Part::new(format!("part-{}", self.next_id), length).with_name(name));
    }

    /// Renames a part. A blank name keeps the current one.
    pub fn rename(&mut self, id: &str, name: &str) -> Result<()> {
        let part = self
            .parts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::invalid(format!("unknown part {id}")))?;
        let name = name.trim();
        if !name.is_empty() {
            part.name = name.to_string();
        }
        Ok(())
    }

    /// Removes a part by ID.
    pub fn remove(&mut self, id: &str) -> Option<Part> {
        let idx = self.parts.iter().position(|p| p.id == id)?;
        Some(self.parts.remove(idx))
    }

    /// Removes the earliest added part of `length`.
    pub fn remove_one_of_length(&mut self, length: f64) -> Option<Part> {
        let idx = self.parts.iter().position(|p| p.length == length)?;
        Some(self.parts.remove(idx))
    }

    /// Removes every part of `length`, returning how many were removed.
    pub fn remove_length_group(&mut self, length: f64) -> usize {
        let before = self.parts.len();
        self.parts.retain(|p| p.length != length);
        before - self.parts.len()
    }

    /// Groups the parts by length, shortest first.
    pub fn groups(&self) -> Vec<LengthGroup> {
        group_lengths(self.parts.iter().map(|p| p.length))
    }

    /// Finds a part by ID.
    pub fn get(&self, id: &str) -> Option<&Part> {
        self.parts.iter().find(|p| p.id == id)
    }

    /// All parts in creation order.
    pub fn as_slice(&self) -> &[Part] {
        &self.parts
    }

    /// Number of parts.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Returns true if there are no parts.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// IDs of all parts, in creation order.
    pub fn ids(&self) -> Vec<PartId> {
        self.parts.iter().map(|p| p.id.clone()).collect()
    }
}

/// The stock available for a job.
#[derive(Debug, Clone, Default)]
pub struct StockList {
    pieces: Vec<StockPiece>,
    next_id: u64,
}

impl StockList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one custom piece for every length in `input`.
    pub fn add(&mut self, input: &str) -> Result<&[StockPiece]> {
        let lengths = parse_lengths(input)?;
        let start = self.pieces.len();
        for length in lengths {
            let id = self.next_id();
            self.pieces.push(StockPiece::new(id, length));
        }
        Ok(&self.pieces[start..])
    }

    /// Adds a single custom piece of `length`.
    pub fn add_length(&mut self, length: f64) -> Result<&StockPiece> {
        ensure_positive("stock length", length)?;
        let id = self.next_id();
        self.pieces.push(StockPiece::new(id, length));
        Ok(&self.pieces[self.pieces.len() - 1])
    }

    /// Adds one piece of the default length.
    pub fn add_default(&mut self, length: f64) -> Result<&StockPiece> {
        ensure_positive("default stock length", length)?;
        let id = self.next_id();
        self.pieces.push(StockPiece::default_length(id, length));
        Ok(&self.pieces[self.pieces.len() - 1])
    }

    fn next_id(&mut self) -> StockId {
        self.next_id += 1;
        format!("stock-{}", self.next_id)
    }

    /// Removes a piece by ID.
    pub fn remove(&mut self, id: &str) -> Option<StockPiece> {
        let idx = self.pieces.iter().position(|p| p.id == id)?;
        Some(self.pieces.remove(idx))
    }

    /// Removes the earliest added piece of `length` and kind.
    pub fn remove_one_of_length(&mut self, length: f64, is_default: bool) -> Option<StockPiece> {
        let idx = self
            .pieces
            .iter()
            .position(|p| p.length == length && p.is_default == is_default)?;
        Some(self.pieces.remove(idx))
    }

    /// Removes every piece of `length` and kind, returning how many were removed.
    pub fn remove_length_group(&mut self, length: f64, is_default: bool) -> usize {
        let before = self.pieces.len();
        self.pieces
            .retain(|p| !(p.length == length && p.is_default == is_default));
        before - self.pieces.len()
    }

    /// Groups the pieces by length and kind, shortest first.
    ///
    /// Groups of equal length keep the order in which they first appeared.
    pub fn groups(&self) -> Vec<StockGroup> {
        let mut groups: Vec<StockGroup> = Vec::new();
        for piece in &self.pieces {
            match groups.iter_mut().find(|g| g.matches(piece)) {
                Some(group) => group.quantity += 1,
                None => groups.push(StockGroup {
                    length: piece.length,
                    is_default: piece.is_default,
                    quantity: 1,
                }),
            }
        }
        groups.sort_by(|a, b| a.length.total_cmp(&b.length));
        groups
    }

    /// All pieces in the order they were added.
    pub fn as_slice(&self) -> &[StockPiece] {
        &self.pieces
    }

    /// Number of pieces.
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Returns true if there is no stock.
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}

/// A complete job: parts, stock and optimizer settings.
#[derive(Debug, Clone, Default)]
pub struct CutList {
    /// Required parts.
    pub parts: PartList,
    /// Available stock.
    pub stock: StockList,
    /// Optimizer settings.
    pub config: OptimizerConfig,
}

impl CutList {
    /// Creates an empty job with the given settings.
    pub fn new(config: OptimizerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Adds one default-length stock piece using the configured length.
    pub fn add_default_stock(&mut self) -> Result<&StockPiece> {
        self.stock.add_default(self.config.default_stock_length)
    }

    /// Computes the plan for the current input.
    ///
    /// Returns `Ok(None)` when there are no parts or no stock.
    pub fn plan(&self) -> Result<Option<Plan>> {
        if self.parts.is_empty() || self.stock.is_empty() {
            return Ok(None);
        }
        Optimizer::new(self.config.clone())
            .solve(self.parts.as_slice(), self.stock.as_slice())
            .map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_value() {
        assert_eq!(parse_lengths(" 1200 ").unwrap(), vec![1200.0]);
        assert!(parse_lengths("abc").is_err());
        assert!(parse_lengths("-5").is_err());
        assert!(parse_lengths("").is_err());
    }

    #[test]
    fn test_parse_batch_skips_invalid() {
        assert_eq!(
            parse_lengths("100, 200,, abc, -4, 300").unwrap(),
            vec![100.0, 200.0, 300.0]
        );
        assert!(parse_lengths("x, y, 0").is_err());
    }

    #[test]
    fn test_parse_trailing_comma_is_single() {
        assert_eq!(parse_lengths("450,").unwrap(), vec![450.0]);
    }

    #[test]
    fn test_add_parts_names_in_order() {
        let mut list = PartList::new();
        list.add("100, 200", 2).unwrap();

        let names: Vec<&str> = list.as_slice().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C", "D"]);
        let lengths: Vec<f64> = list.as_slice().iter().map(|p| p.length).collect();
        assert_eq!(lengths, vec![100.0, 100.0, 200.0, 200.0]);

        let added = list.add("50", 1).unwrap();
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].name, "E");
    }

    #[test]
    fn test_add_rejects_zero_quantity() {
        let mut list = PartList::new();
        assert!(list.add("100", 0).is_err());
        assert!(list.is_empty());
    }

    #[test]
    fn test_ids_are_unique_after_removal() {
        let mut list = PartList::new();
        list.add("100, 200", 1).unwrap();
        let first = list.as_slice()[0].id.clone();
        list.remove(&first).unwrap();
        list.add("300", 1).unwrap();

        let ids = list.ids();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn test_rename() {
        let mut list = PartList::new();
        list.add("100", 1).unwrap();
        let id = list.as_slice()[0].id.clone();

        list.rename(&id, "Shelf").unwrap();
        assert_eq!(list.get(&id).unwrap().name, "Shelf");

        list.rename(&id, "   ").unwrap();
        assert_eq!(list.get(&id).unwrap().name, "Shelf");

        assert!(list.rename("missing", "X").is_err());
    }

    #[test]
    fn test_groups_and_group_removal() {
        let mut list = PartList::new();
        list.add("300, 100, 300, 200", 1).unwrap();

        let groups = list.groups();
        assert_eq!(
            groups,
            vec![
                LengthGroup { length: 100.0, quantity: 1 },
                LengthGroup { length: 200.0, quantity: 1 },
                LengthGroup { length: 300.0, quantity: 2 },
            ]
        );

        assert!(list.remove_one_of_length(300.0).is_some());
        assert_eq!(list.groups()[2].quantity, 1);
        assert_eq!(list.remove_length_group(100.0), 1);
        assert_eq!(list.len(), 2);
        assert!(list.remove_one_of_length(999.0).is_none());
    }

    #[test]
    fn test_stock_list() {
        let mut stock = StockList::new();
        stock.add("3000, 2400").unwrap();
        let piece = stock.add_default(3600.0).unwrap();
        assert!(piece.is_default);
        assert_eq!(stock.len(), 3);
        assert!(!stock.as_slice()[0].is_default);

        assert_eq!(stock.remove_length_group(2400.0, false), 1);
        assert_eq!(stock.remove_length_group(3600.0, false), 0);
        assert!(stock.add_default(0.0).is_err());
    }

    #[test]
    fn test_stock_groups_split_by_kind() {
        let mut stock = StockList::new();
        stock.add("3600").unwrap();
        stock.add_default(3600.0).unwrap();
        stock.add("2400").unwrap();

        assert_eq!(
            stock.groups(),
            vec![
                StockGroup { length: 2400.0, is_default: false, quantity: 1 },
                StockGroup { length: 3600.0, is_default: false, quantity: 1 },
                StockGroup { length: 3600.0, is_default: true, quantity: 1 },
            ]
        );

        assert_eq!(stock.remove_length_group(3600.0, false), 1);
        assert_eq!(stock.len(), 2);
        assert!(stock.as_slice().iter().any(|s| s.is_default && s.length == 3600.0));
    }

    #[test]
    fn test_remove_one_takes_earliest_of_group() {
        let mut stock = StockList::new();
        stock.add("1000, 1000").unwrap();
        stock.add_default(1000.0).unwrap();
        let first = stock.as_slice()[0].id.clone();

        let removed = stock.remove_one_of_length(1000.0, false).unwrap();
        assert_eq!(removed.id, first);
        assert!(!removed.is_default);

        let removed = stock.remove_one_of_length(1000.0, true).unwrap();
        assert!(removed.is_default);
        assert!(stock.remove_one_of_length(1000.0, true).is_none());
        assert_eq!(stock.len(), 1);

        let mut parts = PartList::new();
        parts.add("500", 3).unwrap();
        let removed = parts.remove_one_of_length(500.0).unwrap();
        assert_eq!(removed.name, "A");
    }

    #[test]
    fn test_cut_list_no_plan_without_stock() {
        let mut job = CutList::new(OptimizerConfig::default());
        job.parts.add("500", 1).unwrap();
        assert!(job.plan().unwrap().is_none());

        job.add_default_stock().unwrap();
        let plan = job.plan().unwrap().unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.assignments[0].cuts[0].name, "A");
    }

    #[test]
    fn test_cut_list_no_plan_without_parts() {
        let mut job = CutList::default();
        job.stock.add("3000").unwrap();
        assert!(job.plan().unwrap().is_none());
    }
}
