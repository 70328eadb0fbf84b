use crate::models::violation::{
    AdditionalInfo,
    ExplainResponse,
    ExplanationRecord,
    ViolationCategory,
    ViolationSummary,
};

pub const EXPLANATION_NOT_FOUND: &str = "No explanation found for this violation.";

pub struct ViolationEntry {
    pub summary: ViolationSummary,
    pub explanation: ExplanationRecord,
}

pub static VIOLATIONS: &[ViolationEntry] = &[
    ViolationEntry {
        summary: ViolationSummary {
            id: "speeding",
            name: "Speeding",
            description: "Exceeding posted speed limits",
            category: ViolationCategory::Moving,
        },
        explanation: ExplanationRecord {
            title: "Speeding",
            description: "Speeding is driving above the posted speed limit or too fast for road conditions.",
            legal_reference: "Section 183, Motor Vehicles Act, 1988",
            consequences: &[
                "Fines (₹1000–₹5000)",
                "Points on your license",
                "Increased risk of accidents",
                "Possible license suspension for repeat offenses",
            ],
            prevention: &[
                "Always observe speed limits",
                "Adjust your speed for weather and traffic",
                "Use cruise control on highways if available",
            ],
            additional: AdditionalInfo {
                legal_status: "This violation is taken seriously by law enforcement and can result in significant penalties.",
                insurance_impact: "Violations can lead to increased insurance premiums and potential policy cancellations.",
            },
        },
    },
    ViolationEntry {
        summary: ViolationSummary {
            id: "red_light",
            name: "Red Light Violation",
            description: "Running red lights or stop signs",
            category: ViolationCategory::Moving,
        },
        explanation: ExplanationRecord {
            title: "Red Light Violation",
            description: "Entering an intersection after the traffic signal has turned red.",
            legal_reference: "Section 177, Motor Vehicles Act, 1988",
            consequences: &[
                "Fines (₹3000–₹5000)",
                "License points",
                "Increased risk of severe accidents",
                "Possible license suspension",
            ],
            prevention: &[
                "Always slow down at yellow lights and stop at red lights",
                "Stay alert at intersections",
            ],
            additional: AdditionalInfo {
                legal_status: "Running a red light is a major traffic offense and is strictly enforced.",
                insurance_impact: "May result in higher insurance rates and possible denial of claims in case of an accident.",
            },
        },
    },
    ViolationEntry {
        summary: ViolationSummary {
            id: "parking",
            name: "Illegal Parking",
            description: "Parking in unauthorized areas",
            category: ViolationCategory::NonMoving,
        },
        explanation: ExplanationRecord {
            title: "Illegal Parking",
            description: "Parking in unauthorized areas, such as no-parking zones, in front of driveways, or blocking emergency access.",
            legal_reference: "Section 122/177, Motor Vehicles Act, 1988",
            consequences: &["Fines (₹1000)", "Vehicle towing", "Inconvenience", "Possible additional penalties"],
            prevention: &[
                "Park only in designated areas",
                "Check for parking signs",
                "Avoid blocking access points",
            ],
            additional: AdditionalInfo {
                legal_status: "Illegal parking is a minor offense but can escalate if it obstructs emergency services.",
                insurance_impact: "Frequent violations may affect your driving record and insurance premiums.",
            },
        },
    },
    ViolationEntry {
        summary: ViolationSummary {
            id: "dui",
            name: "DUI/DWI",
            description: "Driving under the influence",
            category: ViolationCategory::Criminal,
        },
        explanation: ExplanationRecord {
            title: "DUI/DWI",
            description: "Operating a vehicle while impaired by alcohol or drugs.",
            legal_reference: "Section 185, Motor Vehicles Act, 1988",
            consequences: &[
                "Heavy fines (₹10,000+)",
                "License suspension",
                "Imprisonment",
                "High risk of causing accidents",
            ],
            prevention: &[
                "Never drive after consuming alcohol or drugs",
                "Use a taxi, rideshare, or designated driver",
            ],
            additional: AdditionalInfo {
                legal_status: "DUI/DWI is a criminal offense with severe legal consequences.",
                insurance_impact: "Almost always results in cancellation of insurance and denial of claims.",
            },
        },
    },
    ViolationEntry {
        summary: ViolationSummary {
            id: "reckless",
            name: "Reckless Driving",
            description: "Driving with willful disregard for safety",
            category: ViolationCategory::Criminal,
        },
        explanation: ExplanationRecord {
            title: "Reckless Driving",
            description: "Driving with willful disregard for safety, such as aggressive lane changes, racing, or tailgating.",
            legal_reference: "Section 184, Motor Vehicles Act, 1988",
            consequences: &["Fines", "License suspension", "Criminal charges", "Increased accident risk"],
            prevention: &["Drive defensively", "Obey all traffic laws", "Avoid aggressive maneuvers"],
            additional: AdditionalInfo {
                legal_status: "Reckless driving is a serious offense and can lead to criminal prosecution.",
                insurance_impact: "Significantly increases insurance premiums and risk of policy cancellation.",
            },
        },
    },
    ViolationEntry {
        summary: ViolationSummary {
            id: "hit_run",
            name: "Hit and Run",
            description: "Leaving scene of an accident",
            category: ViolationCategory::Criminal,
        },
        explanation: ExplanationRecord {
            title: "Hit and Run",
            description: "Leaving the scene of an accident without stopping to provide information or help.",
            legal_reference: "Section 134, Motor Vehicles Act, 1988",
            consequences: &[
                "Severe criminal penalties",
                "Fines",
                "Imprisonment",
                "Permanent license revocation",
            ],
            prevention: &[
                "Always stop and assist if you are involved in an accident",
                "Provide your information to authorities",
            ],
            additional: AdditionalInfo {
                legal_status: "Hit and run is a criminal offense with mandatory jail time and heavy fines.",
                insurance_impact: "Insurance claims are usually denied and policy is likely to be cancelled.",
            },
        },
    },
    ViolationEntry {
        summary: ViolationSummary {
            id: "texting",
            name: "Texting While Driving",
            description: "Using mobile devices while driving",
            category: ViolationCategory::Moving,
        },
        explanation: ExplanationRecord {
            title: "Texting While Driving",
            description: "Using a mobile phone for texting or calls while driving, which distracts you from the road.",
            legal_reference: "Section 184, Motor Vehicles Act, 1988",
            consequences: &["Fines (₹2000)", "Increased accident risk", "License points"],
            prevention: &[
                "Use hands-free devices or pull over to use your phone",
                "Avoid distractions while driving",
            ],
            additional: AdditionalInfo {
                legal_status: "Texting while driving is a punishable offense and is increasingly enforced.",
                insurance_impact: "May result in higher premiums and denial of claims if proven as accident cause.",
            },
        },
    },
    ViolationEntry {
        summary: ViolationSummary {
            id: "seatbelt",
            name: "No Seatbelt",
            description: "Not wearing seatbelt or child restraints",
            category: ViolationCategory::NonMoving,
        },
        explanation: ExplanationRecord {
            title: "No Seatbelt",
            description: "Not wearing a seatbelt or not using child restraints.",
            legal_reference: "Section 194B, Motor Vehicles Act, 1988",
            consequences: &["Fines (₹1000)", "Increased risk of injury or death in an accident"],
            prevention: &["Always wear your seatbelt", "Ensure all passengers are buckled up"],
            additional: AdditionalInfo {
                legal_status: "Seatbelt violations are strictly enforced for safety reasons.",
                insurance_impact: "Injury claims may be reduced or denied if seatbelts were not used.",
            },
        },
    },
];

/// Exact id lookup. No case folding or fuzzy matching.
pub fn find_explanation(violation_id: &str) -> Option<&'static ExplanationRecord> {
    VIOLATIONS.iter()
        .find(|entry| entry.summary.id == violation_id)
        .map(|entry| &entry.explanation)
}

pub fn explain(violation_id: &str) -> ExplainResponse {
    match find_explanation(violation_id) {
        Some(record) => ExplainResponse::found(record),
        None => ExplainResponse::failure(EXPLANATION_NOT_FOUND),
    }
}

/// Summaries whose name or description contains `query` (case-insensitive), optionally
/// restricted to one category. An empty query matches everything.
pub fn catalog(query: Option<&str>, category: Option<ViolationCategory>) -> Vec<&'static ViolationSummary> {
    let needle = query.map(|q| q.trim().to_lowercase()).unwrap_or_default();
    VIOLATIONS.iter()
        .map(|entry| &entry.summary)
        .filter(|summary| category.map_or(true, |c| summary.category == c))
        .filter(|summary| {
            needle.is_empty() ||
                summary.name.to_lowercase().contains(&needle) ||
                summary.description.to_lowercase().contains(&needle)
        })
        .collect()
}
