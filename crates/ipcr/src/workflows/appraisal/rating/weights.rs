use super::super::domain::{EmployeeCategory, SectionKind};
use serde::{Deserialize, Serialize};

/// Percentage weight per section, derived from the employee category.
///
/// Drivers carry an extra `passenger` bucket that has no section of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightTable {
    pub core: u8,
    pub strategic: u8,
    pub support: u8,
    pub other: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passenger: Option<u8>,
}

impl WeightTable {
    pub const DIRECTOR_UNIT_HEAD: Self = Self::four(60, 30, 0, 10);
    pub const OFFICE_STAFF: Self = Self::four(50, 20, 20, 10);
    pub const DRIVER: Self = Self {
        core: 50,
        strategic: 0,
        support: 10,
        other: 20,
        passenger: Some(20),
    };
    pub const DEFAULT: Self = Self::four(50, 20, 20, 10);

    const fn four(core: u8, strategic: u8, support: u8, other: u8) -> Self {
        Self {
            core,
            strategic,
            support,
            other,
            passenger: None,
        }
    }

    pub const fn for_section(&self, kind: SectionKind) -> u8 {
        match kind {
            SectionKind::Core => self.core,
            SectionKind::Strategic => self.strategic,
            SectionKind::Support => self.support,
            SectionKind::Other => self.other,
        }
    }

    /// Sum of every bucket, passenger included.
    pub fn total(&self) -> u16 {
        SectionKind::ordered()
            .into_iter()
            .map(|kind| u16::from(self.for_section(kind)))
            .sum::<u16>()
            + u16::from(self.passenger.unwrap_or(0))
    }
}

pub fn weights_for_category(category: EmployeeCategory) -> WeightTable {
    match category {
        EmployeeCategory::DirectorUnitHead => WeightTable::DIRECTOR_UNIT_HEAD,
        EmployeeCategory::OfficeStaff => WeightTable::OFFICE_STAFF,
        EmployeeCategory::Driver => WeightTable::DRIVER,
    }
}

/// Lookup by free-form category label; anything unrecognized gets the default table.
pub fn weights_for_label(label: &str) -> WeightTable {
    EmployeeCategory::from_code(label)
        .map(weights_for_category)
        .unwrap_or(WeightTable::DEFAULT)
}
