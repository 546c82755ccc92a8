//! Enumerated domain vocabulary.
//!
//! Every enum serializes as its SCREAMING_SNAKE_CASE wire code, both through
//! serde (JSON bodies) and strum (`Display`, `FromStr`, query strings).

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Role carried by an authenticated identity.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Citizen,
    Officer,
    DepartmentHead,
    Admin,
    DistrictCommissioner,
    AdditionalDistrictCommissioner,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// Government department a complaint can be routed to.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Department {
    #[default]
    Unassigned,
    Revenue,
    Police,
    Health,
    Education,
    WaterResources,
    PublicWorks,
    Electricity,
    Agriculture,
    RuralDevelopment,
    UrbanDevelopment,
    SocialWelfare,
    FoodAndCivilSupplies,
    Transport,
    Forest,
    Environment,
    MunicipalCorporation,
    PanchayatiRaj,
    WomenAndChildDevelopment,
    Labour,
    Housing,
    Irrigation,
    AnimalHusbandry,
    Sanitation,
    Other,
}

impl Department {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// Lifecycle status of a complaint.
///
/// The legal moves between these live in `grievance_core::transitions`;
/// nothing here encodes them.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplaintStatus {
    #[default]
    Created,
    Assigned,
    InProgress,
    Blocked,
    Resolved,
    Closed,
    Rejected,
    Duplicate,
}

impl ComplaintStatus {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// Citizen-facing complaint category.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplaintCategory {
    Infrastructure,
    Roads,
    WaterSupply,
    Electricity,
    Sanitation,
    PublicSafety,
    Health,
    Education,
    Corruption,
    Other,
}

impl ComplaintCategory {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// One-shot approval decision on a self-registered officer account.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}
