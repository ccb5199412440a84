use crate::record::BookRecord;

/// One representative holding for each of five network branches.
static SAMPLE_BOOKS: &[[&str; 7]] = &[
    ["달성의 역사와 문화", "김대구", "대구출판사", "2024", "DS001234", "20240115", "달성군립도서관"],
    ["논공읍 이야기", "이달성", "향토문화사", "2025", "DS002345", "20250203", "논공도서관"],
    ["다사읍의 사계", "박다사", "계절출판", "2025", "DS003456", "20250515", "다사도서관"],
    ["화원읍 꽃이야기", "최화원", "꽃담출판", "2026", "DS004567", "20260120", "화원도서관"],
    ["유가읍 전통시장", "정유가", "시장문화사", "2026", "DS005678", "20260210", "유가도서관"],
];

/// Fixed records written when no live data could be produced.
pub fn sample_books() -> Vec<BookRecord> {
    SAMPLE_BOOKS
        .iter()
        .map(|[title, author, publisher, year, reg, shelved, library]| BookRecord {
            title: title.to_string(),
            author: author.to_string(),
            publisher: publisher.to_string(),
            publication_year: year.to_string(),
            registration_number: reg.to_string(),
            shelving_date: shelved.to_string(),
            library: library.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LIBRARY_KEYWORDS;
    use crate::process::date_parser::normalize_shelving_date;
    use std::collections::HashSet;

    #[test]
    fn five_distinct_branches() {
        let books = sample_books();
        assert_eq!(books.len(), 5);
        let libs: HashSet<&str> = books.iter().map(|b| b.library.as_str()).collect();
        assert_eq!(libs.len(), 5);
    }

    #[test]
    fn deterministic() {
        assert_eq!(sample_books(), sample_books());
        assert_eq!(sample_books()[0].title, "달성의 역사와 문화");
        assert_eq!(sample_books()[4].registration_number, "DS005678");
    }

    #[test]
    fn samples_pass_the_pipeline_rules() {
        for book in sample_books() {
            assert!(LIBRARY_KEYWORDS.iter().any(|k| book.library.contains(k)));
            assert_eq!(normalize_shelving_date(&book.shelving_date), book.shelving_date);
            assert!(book.fields().iter().all(|f| !f.is_empty()));
        }
    }
}
