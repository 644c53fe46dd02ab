use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for appraisal records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AppraisalId(pub String);

/// Identifier of the staff member owning (or acting on) an appraisal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub String);

/// Staff classification that selects the section weight table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmployeeCategory {
    DirectorUnitHead,
    OfficeStaff,
    Driver,
}

impl EmployeeCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::DirectorUnitHead => "Director / Unit Head",
            Self::OfficeStaff => "Office Staff",
            Self::Driver => "Driver",
        }
    }

    /// Parses the wire code (`OFFICE_STAFF`) or a loosely spelled label (`office staff`).
    pub fn from_code(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_uppercase().replace([' ', '-', '/'], "_");
        match normalized.as_str() {
            "DIRECTOR_UNIT_HEAD" | "DIRECTOR___UNIT_HEAD" => Some(Self::DirectorUnitHead),
            "OFFICE_STAFF" => Some(Self::OfficeStaff),
            "DRIVER" => Some(Self::Driver),
            _ => None,
        }
    }
}

/// Workflow state of an appraisal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppraisalStatus {
    Draft,
    Submitted,
    Reviewed,
    Approved,
    Archived,
}

impl AppraisalStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Submitted => "SUBMITTED",
            Self::Reviewed => "REVIEWED",
            Self::Approved => "APPROVED",
            Self::Archived => "ARCHIVED",
        }
    }

    /// Approved and archived records are frozen for every role.
    pub const fn is_locked(self) -> bool {
        matches!(self, Self::Approved | Self::Archived)
    }

    pub fn from_code(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        [
            Self::Draft,
            Self::Submitted,
            Self::Reviewed,
            Self::Approved,
            Self::Archived,
        ]
        .into_iter()
        .find(|status| status.label().eq_ignore_ascii_case(raw))
    }
}

/// Caller role supplied by the identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Employee,
    ImmediateSupervisor,
    Vp,
    Pmt,
    SucPresident,
}

impl Role {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Employee,
            Self::ImmediateSupervisor,
            Self::Vp,
            Self::Pmt,
            Self::SucPresident,
        ]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Employee => "EMPLOYEE",
            Self::ImmediateSupervisor => "IMMEDIATE_SUPERVISOR",
            Self::Vp => "VP",
            Self::Pmt => "PMT",
            Self::SucPresident => "SUC_PRESIDENT",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Employee => "Employee",
            Self::ImmediateSupervisor => "Immediate Supervisor",
            Self::Vp => "Vice President",
            Self::Pmt => "PMT Admin",
            Self::SucPresident => "SUC President",
        }
    }

    pub fn from_code(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ordered()
            .into_iter()
            .find(|role| role.code().eq_ignore_ascii_case(raw))
    }
}

/// Identity and role of whoever is acting on an appraisal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user_id: UserId,
    pub role: Role,
}

impl Caller {
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: UserId(user_id.into()),
            role,
        }
    }
}

/// Half-year the indicator is committed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RatingPeriod {
    #[default]
    #[serde(rename = "Jan-Jun")]
    JanJun,
    #[serde(rename = "Jul-Dec")]
    JulDec,
}

impl RatingPeriod {
    pub const fn label(self) -> &'static str {
        match self {
            Self::JanJun => "Jan-Jun",
            Self::JulDec => "Jul-Dec",
        }
    }
}

/// Sustainable Development Goal tags an indicator may be classified under.
pub const SDG_OPTIONS: [&str; 17] = [
    "1. No Poverty",
    "2. Zero Hunger",
    "3. Good Health",
    "4. Quality Education",
    "5. Gender Equality",
    "6. Clean Water",
    "7. Clean Energy",
    "8. Decent Work",
    "9. Industry/Innovation",
    "10. Reduced Inequality",
    "11. Sustainable Cities",
    "12. Responsible Consumption",
    "13. Climate Action",
    "14. Life Below Water",
    "15. Life on Land",
    "16. Peace/Justice",
    "17. Partnerships",
];

/// Metadata for a supporting document. File bytes live in external storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evidence {
    pub id: String,
    pub file_name: String,
    pub file_size: u64,
    pub upload_date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

/// One line of the form (an "indicator"): the commitment plus its Q/E/T sub-scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingItem {
    pub id: ItemId,
    #[serde(default)]
    pub kra: String,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub accomplishment: String,
    #[serde(default)]
    pub sdg: Vec<String>,
    #[serde(default)]
    pub q: Option<u8>,
    #[serde(default)]
    pub e: Option<u8>,
    #[serde(default)]
    pub t: Option<u8>,
    #[serde(default)]
    pub remarks: String,
    #[serde(default)]
    pub is_fixed_volume: bool,
    #[serde(default)]
    pub period: RatingPeriod,
    #[serde(default)]
    pub evidence: Vec<Evidence>,
}

impl RatingItem {
    /// Blank row as appended by the editor.
    pub fn empty(id: ItemId) -> Self {
        Self {
            id,
            kra: String::new(),
            target: String::new(),
            accomplishment: String::new(),
            sdg: Vec::new(),
            q: None,
            e: None,
            t: None,
            remarks: String::new(),
            is_fixed_volume: false,
            period: RatingPeriod::default(),
            evidence: Vec::new(),
        }
    }

    pub fn sub_scores(&self) -> [Option<u8>; 3] {
        [self.q, self.e, self.t]
    }

    /// True once any of Q/E/T carries a value, zero included.
    pub fn has_any_score(&self) -> bool {
        self.sub_scores().iter().any(Option::is_some)
    }
}

/// The four rating sections of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Core,
    Strategic,
    Support,
    Other,
}

impl SectionKind {
    pub const fn ordered() -> [Self; 4] {
        [Self::Core, Self::Strategic, Self::Support, Self::Other]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Core => "Core Functions",
            Self::Strategic => "Strategic Functions",
            Self::Support => "Support Functions",
            Self::Other => "Other Functions",
        }
    }

    pub fn from_slug(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "core" => Some(Self::Core),
            "strategic" => Some(Self::Strategic),
            "support" => Some(Self::Support),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// A single appraisal form for one staff member and one rating period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appraisal {
    pub id: AppraisalId,
    pub user_id: UserId,
    pub period_start: String,
    pub period_end: String,
    pub category: EmployeeCategory,
    #[serde(default)]
    pub has_designation: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation_rating: Option<f64>,
    pub status: AppraisalStatus,
    #[serde(default)]
    pub core_functions: Vec<RatingItem>,
    #[serde(default)]
    pub strategic_functions: Vec<RatingItem>,
    #[serde(default)]
    pub support_functions: Vec<RatingItem>,
    #[serde(default)]
    pub other_functions: Vec<RatingItem>,
    #[serde(default)]
    pub comments: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratee_signed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supervisor_signed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approver_signed_at: Option<DateTime<Utc>>,
}

impl Appraisal {
    /// Fresh draft with empty sections.
    pub fn draft(
        id: AppraisalId,
        user_id: UserId,
        period_start: impl Into<String>,
        period_end: impl Into<String>,
        category: EmployeeCategory,
    ) -> Self {
        Self {
            id,
            user_id,
            period_start: period_start.into(),
            period_end: period_end.into(),
            category,
            has_designation: false,
            designation_rating: None,
            status: AppraisalStatus::Draft,
            core_functions: Vec::new(),
            strategic_functions: Vec::new(),
            support_functions: Vec::new(),
            other_functions: Vec::new(),
            comments: String::new(),
            ratee_signed_at: None,
            supervisor_signed_at: None,
            approver_signed_at: None,
        }
    }

    pub fn section(&self, kind: SectionKind) -> &[RatingItem] {
        match kind {
            SectionKind::Core => &self.core_functions,
            SectionKind::Strategic => &self.strategic_functions,
            SectionKind::Support => &self.support_functions,
            SectionKind::Other => &self.other_functions,
        }
    }

    pub fn section_mut(&mut self, kind: SectionKind) -> &mut Vec<RatingItem> {
        match kind {
            SectionKind::Core => &mut self.core_functions,
            SectionKind::Strategic => &mut self.strategic_functions,
            SectionKind::Support => &mut self.support_functions,
            SectionKind::Other => &mut self.other_functions,
        }
    }

    pub fn item_mut(&mut self, kind: SectionKind, item_id: &ItemId) -> Option<&mut RatingItem> {
        self.section_mut(kind)
            .iter_mut()
            .find(|item| &item.id == item_id)
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }
}
