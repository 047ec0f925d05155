//! Filter and ordering expressions for file listings.
//!
//! A [`FileQuery`] is backend-neutral: the document store adapter compiles it
//! into its own query language.

use uuid::Uuid;

use super::file::FileType;

pub const DEFAULT_SORT: &str = "$createdAt-desc";

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Owned by one of the given users.
    OwnerIn(Vec<Uuid>),
    /// The email is on the collaborator list.
    SharedWith(String),
    TypeIn(Vec<FileType>),
    /// Case-insensitive substring of the name.
    NameContains(String),
    And(Vec<Filter>),
    Or(Vec<Filter>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    CreatedAt,
    Name,
    Size,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for Sort {
    fn default() -> Self {
        Self {
            field: SortField::CreatedAt,
            direction: SortDirection::Desc,
        }
    }
}

impl Sort {
    /// Parses `<field>-<asc|desc>`, e.g. `name-asc` or `$createdAt-desc`.
    /// Anything unrecognised falls back to newest first.
    pub fn parse(value: &str) -> Sort {
        let Some((field, direction)) = value.trim().rsplit_once('-') else {
            return Sort::default();
        };
        let field = match field {
            "$createdAt" | "createdAt" => SortField::CreatedAt,
            "name" => SortField::Name,
            "size" => SortField::Size,
            _ => return Sort::default(),
        };
        let direction = match direction {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            _ => return Sort::default(),
        };
        Sort { field, direction }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileQuery {
    pub filter: Filter,
    pub sort: Sort,
    pub limit: Option<u32>,
}

impl FileQuery {
    /// Every file the identity may see: owned by it, or shared with its email.
    pub fn visible_to(user_id: Uuid, email: &str) -> Filter {
        Filter::Or(vec![
            Filter::OwnerIn(vec![user_id]),
            Filter::SharedWith(email.to_string()),
        ])
    }

    pub fn listing(
        user_id: Uuid,
        email: &str,
        types: &[FileType],
        search_text: &str,
        sort: Sort,
        limit: Option<u32>,
    ) -> FileQuery {
        let mut clauses = vec![FileQuery::visible_to(user_id, email)];

        if !types.is_empty() {
            clauses.push(Filter::TypeIn(types.to_vec()));
        }

        let search_text = search_text.trim();
        if !search_text.is_empty() {
            clauses.push(Filter::NameContains(search_text.to_string()));
        }

        FileQuery {
            filter: Filter::And(clauses),
            sort,
            limit,
        }
    }

    pub fn owned_by(user_id: Uuid) -> FileQuery {
        FileQuery {
            filter: Filter::OwnerIn(vec![user_id]),
            sort: Sort::default(),
            limit: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sort_keys() {
        assert_eq!(
            Sort::parse("name-asc"),
            Sort {
                field: SortField::Name,
                direction: SortDirection::Asc
            }
        );
        assert_eq!(
            Sort::parse("size-desc"),
            Sort {
                field: SortField::Size,
                direction: SortDirection::Desc
            }
        );
        assert_eq!(Sort::parse(DEFAULT_SORT), Sort::default());
        assert_eq!(Sort::parse("owner-asc"), Sort::default());
        assert_eq!(Sort::parse(""), Sort::default());
    }

    #[test]
    fn empty_refinements_leave_only_visibility() {
        let user_id = Uuid::new_v4();
        let query = FileQuery::listing(user_id, "a@b.co", &[], "   ", Sort::default(), None);
        assert_eq!(
            query.filter,
            Filter::And(vec![FileQuery::visible_to(user_id, "a@b.co")])
        );
    }

    #[test]
    fn refinements_are_conjoined() {
        let user_id = Uuid::new_v4();
        let query = FileQuery::listing(
            user_id,
            "a@b.co",
            &[FileType::Video, FileType::Audio],
            "trip",
            Sort::parse("name-asc"),
            Some(10),
        );
        let Filter::And(clauses) = &query.filter else {
            panic!("expected conjunction");
        };
        assert_eq!(clauses.len(), 3);
        assert_eq!(clauses[1], Filter::TypeIn(vec![FileType::Video, FileType::Audio]));
        assert_eq!(clauses[2], Filter::NameContains("trip".to_string()));
        assert_eq!(query.limit, Some(10));
    }
}
