use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::StudentProfile;

/// Institution-wide placement figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementStats {
    pub total: usize,
    pub placed: usize,
    pub placement_percentage: f64,
    pub avg_ctc: f64,
    pub active_opportunities: usize,
    pub branch_wise: Vec<BranchPlacement>,
    pub company_wise: Vec<CompanyPlacement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchPlacement {
    pub branch: String,
    pub total: usize,
    pub placed: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyPlacement {
    pub company: String,
    pub count: usize,
}

impl PlacementStats {
    pub fn from_profiles(profiles: &[StudentProfile]) -> Self {
        let total = profiles.len();
        let placed: Vec<&StudentProfile> =
            profiles.iter().filter(|profile| profile.is_placed).collect();

        // CTC strings without a leading number still count towards the average as zero.
        let ctcs: Vec<f64> = placed
            .iter()
            .filter_map(|profile| profile.placed_ctc.as_deref())
            .map(|ctc| leading_number(ctc).unwrap_or(0.0))
            .collect();
        let avg_ctc = if ctcs.is_empty() {
            0.0
        } else {
            round2(ctcs.iter().sum::<f64>() / ctcs.len() as f64)
        };

        let mut branches: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
        for profile in profiles {
            let entry = branches.entry(profile.branch.as_str()).or_default();
            entry.0 += 1;
            if profile.is_placed {
                entry.1 += 1;
            }
        }

        let mut companies: BTreeMap<&str, usize> = BTreeMap::new();
        for company in placed
            .iter()
            .filter_map(|profile| profile.placed_company.as_deref())
        {
            *companies.entry(company).or_default() += 1;
        }

        Self {
            total,
            placed: placed.len(),
            placement_percentage: percentage(placed.len(), total),
            avg_ctc,
            active_opportunities: 0,
            branch_wise: branches
                .into_iter()
                .map(|(branch, (total, placed))| BranchPlacement {
                    branch: branch.to_string(),
                    total,
                    placed,
                    percentage: percentage(placed, total),
                })
                .collect(),
            company_wise: companies
                .into_iter()
                .map(|(company, count)| CompanyPlacement {
                    company: company.to_string(),
                    count,
                })
                .collect(),
        }
    }

    pub fn with_active_opportunities(mut self, count: usize) -> Self {
        self.active_opportunities = count;
        self
    }
}

/// Reads the numeric prefix of values such as `"12 LPA"` or `"25-35 LPA"`.
fn leading_number(value: &str) -> Option<f64> {
    let value = value.trim_start();
    let bytes = value.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - digits_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let fraction_start = end + 1;
        let mut fraction_end = fraction_start;
        while fraction_end < bytes.len() && bytes[fraction_end].is_ascii_digit() {
            fraction_end += 1;
        }
        if fraction_end > fraction_start {
            digits += fraction_end - fraction_start;
            end = fraction_end;
        }
    }
    if digits == 0 {
        return None;
    }
    value[..end].parse::<f64>().ok().filter(|number| number.is_finite())
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        round2(part as f64 / whole as f64 * 100.0)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
