use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Cities a posting can be located in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Location {
    Bangalore,
    Hyderabad,
    Pune,
    Chennai,
    Mumbai,
    Gurgaon,
    Noida,
    Delhi,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum WorkMode {
    Remote,
    Hybrid,
    Onsite,
}

/// Experience bracket. String forms are the bracket labels shown to users.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Experience {
    Fresher,
    #[serde(rename = "0-1")]
    #[strum(serialize = "0-1")]
    ZeroToOne,
    #[serde(rename = "1-3")]
    #[strum(serialize = "1-3")]
    OneToThree,
    #[serde(rename = "3-5")]
    #[strum(serialize = "3-5")]
    ThreeToFive,
}

/// Job board the posting was collected from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Source {
    LinkedIn,
    Naukri,
    Indeed,
}

/// A single posting from the read-only catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: u32,
    pub title: String,
    pub company: String,
    pub location: Location,
    pub mode: WorkMode,
    pub experience: Experience,
    pub source: Source,
    pub posted_days_ago: u32,
    /// Free text such as "₹6-10 LPA" or "₹30k-50k/month".
    pub salary_range: String,
    pub description: String,
    pub skills: Vec<String>,
    pub apply_url: String,
}
