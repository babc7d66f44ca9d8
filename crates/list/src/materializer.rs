//! Streaming header synthesis.
//!
//! One pass over the sorted flat rows, holding a "last seen key per level"
//! cache. At the outermost level whose key departs from the cache, a header
//! row is emitted for that level and every level further in, then the book
//! row itself, then the cache is refreshed. Because the sort chain clusters
//! each group's rows (group keys tie-break equal display values), the pass
//! deterministically produces the whole tree in pre-order with exactly one
//! header per distinct (level, ancestor path).

use crate::table::{ListTable, MaterializedRow};
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::{HashMap, HashSet};
use shelfview_catalog::BookId;
use shelfview_core::collation::break_eq;
use shelfview_core::{Result, RowId, Value};
use shelfview_query::key::{join_fragments, key_fragment};
use shelfview_query::{FlatRow, GroupKind, ListPlan};

/// Materializes the flat select into the flattened tree table.
///
/// All-or-nothing: the table only exists on `Ok`, so a failed build leaves
/// no partial state and a retried build starts clean.
pub fn materialize(plan: &ListPlan, flat: Vec<FlatRow>) -> Result<ListTable> {
    let level_count = plan.levels.len();

    // Domains a header at level i carries: display, key and accumulated
    // domains of its own level and every enclosing one. Everything else is
    // Null on the header row.
    let mut carried: Vec<Vec<usize>> = Vec::with_capacity(level_count);
    let mut acc: Vec<usize> = Vec::new();
    for level in &plan.levels {
        acc.push(level.display);
        acc.push(level.key);
        acc.extend(level.accumulated.iter().copied());
        carried.push(acc.clone());
    }

    let mut rows: Vec<MaterializedRow> = Vec::with_capacity(flat.len() * 2);
    let mut book_index: HashMap<BookId, Vec<RowId>> = HashMap::new();
    let mut key_index: BTreeMap<String, RowId> = BTreeMap::new();
    let mut distinct: HashSet<BookId> = HashSet::new();
    let mut book_count = 0usize;

    // Last seen key value per level; empty until the first row.
    let mut last_keys: Vec<Value> = Vec::new();
    let mut next_id: RowId = 1;

    for row in &flat {
        let key_values: Vec<Value> = plan
            .levels
            .iter()
            .map(|level| row.values[level.key].clone())
            .collect();
        let fragments: Vec<String> = plan
            .levels
            .iter()
            .zip(&key_values)
            .map(|(level, value)| key_fragment(level.kind.tag(), value))
            .collect();

        // Outermost level whose key departs from the cache. Every level
        // further in breaks with it.
        let break_level = if last_keys.is_empty() {
            0
        } else {
            key_values
                .iter()
                .zip(&last_keys)
                .position(|(current, last)| !break_eq(current, last))
                .unwrap_or(level_count)
        };

        for i in break_level..level_count {
            let level = &plan.levels[i];
            let node_key = join_fragments(&fragments[..=i]);
            let values: Vec<Value> = (0..plan.domains.len())
                .map(|d| {
                    if carried[i].contains(&d) {
                        row.values[d].clone()
                    } else {
                        Value::Null
                    }
                })
                .collect();
            key_index.insert(node_key.clone(), next_id);
            rows.push(MaterializedRow {
                id: next_id,
                level: level.level,
                kind: level.kind,
                node_key,
                book_id: None,
                values,
            });
            next_id += 1;
        }

        // The triggering book row itself, inserted after its headers.
        let mut book_fragments = fragments;
        book_fragments.push(key_fragment(
            GroupKind::Book.tag(),
            &Value::Int64(row.book_id),
        ));
        rows.push(MaterializedRow {
            id: next_id,
            level: level_count as u32 + 1,
            kind: GroupKind::Book,
            node_key: join_fragments(&book_fragments),
            book_id: Some(row.book_id),
            values: row.values.clone(),
        });
        book_index.entry(row.book_id).or_default().push(next_id);
        distinct.insert(row.book_id);
        book_count += 1;
        next_id += 1;

        last_keys = key_values;
    }

    log::debug!(
        "materialized {} rows ({} books, {} distinct) for style '{}'",
        rows.len(),
        book_count,
        distinct.len(),
        plan.style_name
    );

    Ok(ListTable::new(
        plan.domains.clone(),
        rows,
        level_count as u32 + 1,
        book_index,
        key_index,
        book_count,
        distinct.len(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use shelfview_query::{GroupKind, ListQueryBuilder, StyleBuilder};

    fn author_plan() -> ListPlan {
        let style = StyleBuilder::new("by author")
            .add_group(GroupKind::Author)
            .unwrap()
            .build();
        ListQueryBuilder::new(&style).build().unwrap()
    }

    /// Builds a flat row for the author plan by hand: domains are
    /// [book_id, title, author_sort, a_key].
    fn flat(book_id: i64, title: &str, author: &str, author_id: i64) -> FlatRow {
        FlatRow {
            book_id,
            values: vec![
                Value::Int64(book_id),
                Value::String(title.into()),
                Value::String(author.into()),
                Value::Int64(author_id),
            ],
        }
    }

    #[test]
    fn test_headers_interleave_in_preorder() {
        let plan = author_plan();
        let table = materialize(
            &plan,
            vec![
                flat(10, "A Wizard of Earthsea", "Le Guin, Ursula K.", 1),
                flat(11, "The Dispossessed", "Le Guin, Ursula K.", 1),
                flat(12, "Lord of Light", "Zelazny, Roger", 2),
            ],
        )
        .unwrap();

        // header, book, book, header, book
        let levels: Vec<u32> = table.rows().iter().map(|r| r.level).collect();
        assert_eq!(levels, [1, 2, 2, 1, 2]);
        assert_eq!(table.book_count(), 3);
        assert_eq!(table.distinct_book_count(), 3);
    }

    #[test]
    fn test_header_node_key_prefixes_descendants() {
        let plan = author_plan();
        let table = materialize(
            &plan,
            vec![
                flat(10, "A Wizard of Earthsea", "Le Guin, Ursula K.", 1),
                flat(12, "Lord of Light", "Zelazny, Roger", 2),
            ],
        )
        .unwrap();

        let header = &table.rows()[0];
        let book = &table.rows()[1];
        assert_eq!(header.node_key, "a=1");
        assert_eq!(book.node_key, "a=1/b=10");
    }

    #[test]
    fn test_case_insensitive_break() {
        // String group keys differing only in case must not break: one
        // header for "eng" and "ENG".
        let style = StyleBuilder::new("by language")
            .add_group(GroupKind::Language)
            .unwrap()
            .build();
        let plan = ListQueryBuilder::new(&style).build().unwrap();
        // Domains: [book_id, title, language, ln_key].
        let row = |id: i64, title: &str, lang: &str| FlatRow {
            book_id: id,
            values: vec![
                Value::Int64(id),
                Value::String(title.into()),
                Value::String(lang.into()),
                Value::String(lang.into()),
            ],
        };
        let table =
            materialize(&plan, vec![row(1, "A", "eng"), row(2, "B", "ENG")]).unwrap();
        let headers = table.rows().iter().filter(|r| !r.is_book()).count();
        assert_eq!(headers, 1);
    }

    #[test]
    fn test_header_values_nulled_outside_carried_domains() {
        let plan = author_plan();
        let table = materialize(
            &plan,
            vec![flat(10, "A Wizard of Earthsea", "Le Guin, Ursula K.", 1)],
        )
        .unwrap();

        let header = &table.rows()[0];
        let title_idx = table.domain_index("title").unwrap();
        let author_idx = table.domain_index("author_sort").unwrap();
        assert!(header.values[title_idx].is_null());
        assert_eq!(
            header.values[author_idx],
            Value::String("Le Guin, Ursula K.".into())
        );
    }

    #[test]
    fn test_empty_input_is_empty_table() {
        let plan = author_plan();
        let table = materialize(&plan, vec![]).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.book_count(), 0);
    }

    #[test]
    fn test_flat_style_has_no_headers() {
        let style = StyleBuilder::new("flat").build();
        let plan = ListQueryBuilder::new(&style).build().unwrap();
        let table = materialize(
            &plan,
            vec![FlatRow {
                book_id: 1,
                values: vec![Value::Int64(1), Value::String("A".into())],
            }],
        )
        .unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].level, 1);
        assert!(table.rows()[0].is_book());
        assert_eq!(table.rows()[0].node_key, "b=1");
    }
}
