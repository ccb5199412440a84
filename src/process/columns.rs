// src/process/columns.rs
//
// Column discovery for a dataset whose header labels change between
// publication versions. Every lookup is an ordered rule list; the first rule
// that matches wins and the rule is recorded alongside the column.

use std::fmt;
use tracing::{info, warn};

/// Exact labels accepted as the owning-library column.
pub static LIBRARY_COLUMN_NAMES: &[&str] = &[
    "도서관명",
    "도서관",
    "기관명",
    "기관",
    "소장기관",
    "소장처",
    "배치도서관",
    "장서위치",
    "위치",
    "관리기관",
];

/// Tokens that mark a label as the owning-library column.
pub static LIBRARY_COLUMN_TOKENS: &[&str] = &["도서관", "기관", "소장", "위치"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Author,
    Publisher,
    PublicationYear,
    RegistrationNumber,
    ShelvingDate,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Title,
        Field::Author,
        Field::Publisher,
        Field::PublicationYear,
        Field::RegistrationNumber,
        Field::ShelvingDate,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Author => "author",
            Field::Publisher => "publisher",
            Field::PublicationYear => "publication_year",
            Field::RegistrationNumber => "registration_number",
            Field::ShelvingDate => "shelving_date",
        }
    }

    /// Candidate labels in priority order.
    pub fn candidates(self) -> &'static [&'static str] {
        match self {
            Field::Title => &["도서명", "서명", "제목", "책제목", "자료명"],
            Field::Author => &["저자", "저자명", "지은이"],
            Field::Publisher => &["출판사", "발행처", "출판"],
            Field::PublicationYear => &["발행년도", "출판년도", "출판년", "발행년"],
            Field::RegistrationNumber => &["등록번호", "청구기호", "자료번호"],
            Field::ShelvingDate => &["배가일자", "배치일자", "등록일자", "입수일자"],
        }
    }
}

/// Which rule picked a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchRule {
    /// The label equals this candidate.
    Exact(&'static str),
    /// The label contains this candidate or token.
    Contains(&'static str),
}

impl fmt::Display for MatchRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchRule::Exact(name) => write!(f, "exact '{}'", name),
            MatchRule::Contains(name) => write!(f, "contains '{}'", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumn {
    pub label: String,
    pub index: usize,
    pub rule: MatchRule,
}

/// Result of column discovery. Built once per dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedColumnMap {
    pub library: Option<ResolvedColumn>,
    title: Option<ResolvedColumn>,
    author: Option<ResolvedColumn>,
    publisher: Option<ResolvedColumn>,
    publication_year: Option<ResolvedColumn>,
    registration_number: Option<ResolvedColumn>,
    shelving_date: Option<ResolvedColumn>,
}

impl ResolvedColumnMap {
    pub fn get(&self, field: Field) -> Option<&ResolvedColumn> {
        match field {
            Field::Title => self.title.as_ref(),
            Field::Author => self.author.as_ref(),
            Field::Publisher => self.publisher.as_ref(),
            Field::PublicationYear => self.publication_year.as_ref(),
            Field::RegistrationNumber => self.registration_number.as_ref(),
            Field::ShelvingDate => self.shelving_date.as_ref(),
        }
    }

    fn slot(&mut self, field: Field) -> &mut Option<ResolvedColumn> {
        match field {
            Field::Title => &mut self.title,
            Field::Author => &mut self.author,
            Field::Publisher => &mut self.publisher,
            Field::PublicationYear => &mut self.publication_year,
            Field::RegistrationNumber => &mut self.registration_number,
            Field::ShelvingDate => &mut self.shelving_date,
        }
    }

    /// Number of semantic fields that found a column.
    pub fn resolved_count(&self) -> usize {
        Field::ALL.iter().filter(|f| self.get(**f).is_some()).count()
    }
}

/// First column, in sheet order, that names the owning library.
pub fn find_library_column(headers: &[String]) -> Option<ResolvedColumn> {
    headers.iter().enumerate().find_map(|(index, label)| {
        let rule = LIBRARY_COLUMN_NAMES
            .iter()
            .find(|name| label == *name)
            .map(|name| MatchRule::Exact(*name))
            .or_else(|| {
                LIBRARY_COLUMN_TOKENS
                    .iter()
                    .find(|token| label.contains(*token))
                    .map(|token| MatchRule::Contains(*token))
            })?;
        Some(ResolvedColumn {
            label: label.clone(),
            index,
            rule,
        })
    })
}

/// Column for one semantic field: any exact candidate first, then for each
/// candidate in order the first label containing it.
pub fn find_field_column(headers: &[String], field: Field) -> Option<ResolvedColumn> {
    let candidates = field.candidates();

    let exact = candidates.iter().find_map(|name| {
        headers
            .iter()
            .position(|label| label == name)
            .map(|index| ResolvedColumn {
                label: headers[index].clone(),
                index,
                rule: MatchRule::Exact(*name),
            })
    });
    if exact.is_some() {
        return exact;
    }

    candidates.iter().find_map(|name| {
        headers
            .iter()
            .position(|label| label.contains(name))
            .map(|index| ResolvedColumn {
                label: headers[index].clone(),
                index,
                rule: MatchRule::Contains(*name),
            })
    })
}

/// Resolve every column the normalizer needs, logging each outcome.
pub fn resolve_columns(headers: &[String]) -> ResolvedColumnMap {
    let mut map = ResolvedColumnMap {
        library: find_library_column(headers),
        ..Default::default()
    };

    match &map.library {
        Some(col) => info!(column = %col.label, rule = %col.rule, "library column found"),
        None => warn!(
            available = ?headers,
            "no library column found; using every row"
        ),
    }

    for field in Field::ALL {
        let found = find_field_column(headers, field);
        match &found {
            Some(col) => info!(field = field.key(), column = %col.label, rule = %col.rule, "mapped"),
            None => warn!(field = field.key(), "no matching column; defaulting to '-'"),
        }
        *map.slot(field) = found;
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn library_exact_label() {
        let h = headers(&["번호", "도서명", "도서관명"]);
        let col = find_library_column(&h).unwrap();
        assert_eq!(col.label, "도서관명");
        assert_eq!(col.index, 2);
        assert_eq!(col.rule, MatchRule::Exact("도서관명"));
    }

    #[test]
    fn library_first_column_in_sheet_order_wins() {
        // "소장위치" appears before the exact "도서관명" and contains a token
        let h = headers(&["소장위치", "도서관명"]);
        let col = find_library_column(&h).unwrap();
        assert_eq!(col.label, "소장위치");
        assert_eq!(col.rule, MatchRule::Contains("소장"));
    }

    #[test]
    fn library_missing() {
        let h = headers(&["도서명", "저자"]);
        assert!(find_library_column(&h).is_none());
    }

    #[test]
    fn field_exact_beats_earlier_contains() {
        // "대표서명" contains "서명" and comes first, but "도서명" is exact
        let h = headers(&["대표서명", "도서명"]);
        let col = find_field_column(&h, Field::Title).unwrap();
        assert_eq!(col.label, "도서명");
        assert_eq!(col.rule, MatchRule::Exact("도서명"));
    }

    #[test]
    fn field_candidate_priority_over_column_order() {
        // both are exact candidates; "발행년도" is listed before "출판년도"
        let h = headers(&["출판년도", "발행년도"]);
        let col = find_field_column(&h, Field::PublicationYear).unwrap();
        assert_eq!(col.label, "발행년도");
    }

    #[test]
    fn field_contains_fallback() {
        let h = headers(&["자료 등록번호(바코드)", "저자사항"]);
        let reg = find_field_column(&h, Field::RegistrationNumber).unwrap();
        assert_eq!(reg.index, 0);
        assert_eq!(reg.rule, MatchRule::Contains("등록번호"));
        let author = find_field_column(&h, Field::Author).unwrap();
        assert_eq!(author.label, "저자사항");
        assert_eq!(author.rule, MatchRule::Contains("저자"));
    }

    #[test]
    fn resolve_with_nothing_known() {
        let h = headers(&["col_a", "col_b"]);
        let map = resolve_columns(&h);
        assert!(map.library.is_none());
        assert_eq!(map.resolved_count(), 0);
    }

    #[test]
    fn resolve_typical_sheet() {
        let h = headers(&[
            "도서관명", "등록번호", "도서명", "저자", "출판사", "발행년도", "배가일자",
        ]);
        let map = resolve_columns(&h);
        assert_eq!(map.library.as_ref().unwrap().index, 0);
        assert_eq!(map.resolved_count(), 6);
        assert_eq!(map.get(Field::ShelvingDate).unwrap().index, 6);
        assert_eq!(map.get(Field::Publisher).unwrap().label, "출판사");
    }
}
