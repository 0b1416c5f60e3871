//! User domain entity

use std::borrow::Cow;
use std::cmp::Ordering;

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use uuid::Uuid;

use crate::domain::common::{Gender, Location, Role};
use crate::domain::specification::{cmp_text, Identified, Searchable, SortField};

/// Staff member who can receive assignments.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    /// `SD` followed by a zero-padded sequence number, e.g. `SD0007`
    pub staff_code: String,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub password_hash: String,
    pub date_of_birth: NaiveDate,
    pub joined_date: NaiveDate,
    pub gender: Gender,
    pub role: Role,
    pub location: Location,
    pub is_first_time_login: bool,
    pub is_deleted: bool,
    pub created_on: DateTime<Utc>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Identified for User {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Searchable for User {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.username.as_str()),
            Cow::Borrowed(self.staff_code.as_str()),
            Cow::Owned(self.full_name()),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserSortField {
    StaffCode,
    FirstName,
    LastName,
    FullName,
    Username,
    DateOfBirth,
    JoinedDate,
    Gender,
    Role,
}

impl SortField<User> for UserSortField {
    const DEFAULT: Self = Self::FirstName;
    const ALL: &'static [Self] = &[
        Self::StaffCode,
        Self::FirstName,
        Self::LastName,
        Self::FullName,
        Self::Username,
        Self::DateOfBirth,
        Self::JoinedDate,
        Self::Gender,
        Self::Role,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::StaffCode => "staffCode",
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::FullName => "fullName",
            Self::Username => "username",
            Self::DateOfBirth => "dateOfBirth",
            Self::JoinedDate => "joinedDate",
            Self::Gender => "gender",
            Self::Role => "role",
        }
    }

    fn compare(self, a: &User, b: &User) -> Ordering {
        match self {
            Self::StaffCode => cmp_text(&a.staff_code, &b.staff_code),
            Self::FirstName => cmp_text(&a.first_name, &b.first_name),
            Self::LastName => cmp_text(&a.last_name, &b.last_name),
            Self::FullName => cmp_text(&a.full_name(), &b.full_name()),
            Self::Username => cmp_text(&a.username, &b.username),
            Self::DateOfBirth => a.date_of_birth.cmp(&b.date_of_birth),
            Self::JoinedDate => a.joined_date.cmp(&b.joined_date),
            Self::Gender => a.gender.cmp(&b.gender),
            Self::Role => a.role.cmp(&b.role),
        }
    }
}

// ── Account generation rules ───────────────────────────────────

pub const STAFF_CODE_PREFIX: &str = "SD";
pub const MINIMUM_AGE: i32 = 18;

pub fn format_staff_code(number: u32) -> String {
    format!("{}{:04}", STAFF_CODE_PREFIX, number)
}

/// Parses the numeric part of a staff code (`SD0012` → 12).
pub fn parse_staff_code(code: &str) -> Option<u32> {
    code.strip_prefix(STAFF_CODE_PREFIX)?.parse().ok()
}

/// Lowercase first name followed by the initial of every last-name word:
/// `("Binh", "Nguyen Van")` → `binhnv`.
pub fn base_username(first_name: &str, last_name: &str) -> String {
    let mut username: String = first_name
        .split_whitespace()
        .collect::<String>()
        .to_lowercase();
    username.extend(
        last_name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_lowercase),
    );
    username
}

/// Picks `base` if free, otherwise `base` + the smallest positive free suffix.
pub fn unique_username(base: &str, taken: &[String]) -> String {
    let is_taken = |candidate: &str| taken.iter().any(|t| t.eq_ignore_ascii_case(candidate));
    if !is_taken(base) {
        return base.to_string();
    }
    (1u32..)
        .map(|n| format!("{}{}", base, n))
        .find(|candidate| !is_taken(candidate))
        .unwrap_or_else(|| base.to_string())
}

/// Initial password: `<username>@<ddMMyyyy>` of the date of birth.
pub fn initial_password(username: &str, date_of_birth: NaiveDate) -> String {
    format!("{}@{}", username, date_of_birth.format("%d%m%Y"))
}

/// Completed years between `date_of_birth` and `on`.
pub fn age_on(date_of_birth: NaiveDate, on: NaiveDate) -> i32 {
    let mut age = on.year() - date_of_birth.year();
    if (on.month(), on.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
