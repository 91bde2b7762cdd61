// ---------------------------------------------------------------------------
// Static region → state → geo code table
// ---------------------------------------------------------------------------

/// A named group of Indian states shown together in the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub name: &'static str,
    pub states: &'static [&'static str],
}

/// Regions in display order.
pub const REGIONS: &[Region] = &[
    Region {
        name: "North",
        states: &[
            "Delhi",
            "Uttar Pradesh",
            "Uttarakhand",
            "Himachal Pradesh",
            "Punjab",
            "Haryana",
            "Jammu and Kashmir",
            "Rajasthan",
        ],
    },
    Region {
        name: "East",
        states: &[
            "West Bengal",
            "Bihar",
            "Jharkhand",
            "Odisha",
            "Assam",
            "Meghalaya",
            "Manipur",
            "Mizoram",
            "Nagaland",
            "Tripura",
            "Arunachal Pradesh",
            "Sikkim",
        ],
    },
    Region {
        name: "West",
        states: &["Maharashtra", "Gujarat", "Goa"],
    },
    Region {
        name: "Central",
        states: &["Madhya Pradesh", "Chhattisgarh"],
    },
    Region {
        name: "South",
        states: &[
            "Karnataka",
            "Tamil Nadu",
            "Andhra Pradesh",
            "Telangana",
            "Kerala",
        ],
    },
];

/// ISO 3166-2 sub-division codes understood by Google Trends.
const GEO_CODES: &[(&str, &str)] = &[
    ("Andhra Pradesh", "IN-AP"),
    ("Arunachal Pradesh", "IN-AR"),
    ("Assam", "IN-AS"),
    ("Bihar", "IN-BR"),
    ("Chhattisgarh", "IN-CT"),
    ("Goa", "IN-GA"),
    ("Gujarat", "IN-GJ"),
    ("Haryana", "IN-HR"),
    ("Himachal Pradesh", "IN-HP"),
    ("Jammu and Kashmir", "IN-JK"),
    ("Jharkhand", "IN-JH"),
    ("Karnataka", "IN-KA"),
    ("Kerala", "IN-KL"),
    ("Madhya Pradesh", "IN-MP"),
    ("Maharashtra", "IN-MH"),
    ("Manipur", "IN-MN"),
    ("Meghalaya", "IN-ML"),
    ("Mizoram", "IN-MZ"),
    ("Nagaland", "IN-NL"),
    ("Odisha", "IN-OR"),
    ("Punjab", "IN-PB"),
    ("Rajasthan", "IN-RJ"),
    ("Sikkim", "IN-SK"),
    ("Tamil Nadu", "IN-TN"),
    ("Telangana", "IN-TG"),
    ("Tripura", "IN-TR"),
    ("Uttar Pradesh", "IN-UP"),
    ("Uttarakhand", "IN-UT"),
    ("West Bengal", "IN-WB"),
    ("Delhi", "IN-DL"),
];

/// Geo code for a state name.
pub fn geo_code(state: &str) -> Option<&'static str> {
    GEO_CODES
        .iter()
        .find(|(name, _)| *name == state)
        .map(|(_, code)| *code)
}

/// State name for a geo code (case-insensitive).
pub fn state_for_geo(geo: &str) -> Option<&'static str> {
    GEO_CODES
        .iter()
        .find(|(_, code)| code.eq_ignore_ascii_case(geo))
        .map(|(name, _)| *name)
}

/// Region a state belongs to.
pub fn region_of(state: &str) -> Option<&'static Region> {
    REGIONS.iter().find(|r| r.states.iter().any(|s| *s == state))
}
