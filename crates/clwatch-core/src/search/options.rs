//! Search option tables and resolution.
//!
//! Three option kinds feed one resolver: bare flags, enumerated choices drawn
//! from a per-group table, and numeric range options rendered as
//! `param=amount`. Entries that do not resolve against the tables are dropped
//! with a debug diagnostic, never an error.

/// A search option whose resolved fragment is fixed by the tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaticOption {
    /// Bare flag, e.g. `has_images`.
    Flag(String),
    /// Enumerated choice, e.g. `("size", "compact")`.
    Choice { group: String, value: String },
}

/// A range/numeric option: a known name plus a caller-supplied amount. The
/// amount is rendered verbatim, with no validation of its type or bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarOption {
    pub name: String,
    pub amount: String,
}

impl VarOption {
    pub fn new(name: impl Into<String>, amount: impl ToString) -> Self {
        Self {
            name: name.into(),
            amount: amount.to_string(),
        }
    }
}

/// Flag name → fixed query fragment.
const FLAG_OPTIONS: &[(&str, &str)] = &[
    ("crypto", "crypto_currency_ok=1"),
    ("posted_today", "postToday=1"),
    ("bundled_duplicates", "bundleDuplicates=1"),
    ("has_images", "hasPic=1"),
    ("titles_only", "srchType=T"),
];

/// Enumerated choice groups: group name → (value → fixed query fragment).
const CHOICE_GROUPS: &[(&str, &[(&str, &str)])] = &[
    (
        "condition",
        &[
            ("new", "condition=10"),
            ("like new", "condition=20"),
            ("excellent", "condition=30"),
            ("good", "condition=40"),
            ("fair", "condition=50"),
            ("salvage", "condition=60"),
        ],
    ),
    (
        "cylinders",
        &[
            ("3", "auto_cylinders=1"),
            ("4", "auto_cylinders=2"),
            ("5", "auto_cylinders=3"),
            ("6", "auto_cylinders=4"),
            ("8", "auto_cylinders=5"),
            ("10", "auto_cylinders=6"),
            ("12", "auto_cylinders=7"),
            ("other", "auto_cylinders=8"),
        ],
    ),
    (
        "drive",
        &[
            ("fwd", "auto_drivetrain=1"),
            ("rwd", "auto_drivetrain=2"),
            ("4wd", "auto_drivetrain=3"),
        ],
    ),
    (
        "fuel",
        &[
            ("gas", "auto_fuel_type=1"),
            ("diesel", "auto_fuel_type=2"),
            ("hybrid", "auto_fuel_type=3"),
            ("electric", "auto_fuel_type=4"),
            ("other", "auto_fuel_type=6"),
        ],
    ),
    (
        "color",
        &[
            ("black", "auto_paint=1"),
            ("blue", "auto_paint=2"),
            ("brown", "auto_paint=20"),
            ("green", "auto_paint=3"),
            ("grey", "auto_paint=4"),
            ("orange", "auto_paint=5"),
            ("purple", "auto_paint=6"),
            ("red", "auto_paint=7"),
            ("silver", "auto_paint=8"),
            ("white", "auto_paint=9"),
            ("yellow", "auto_paint=10"),
            ("custom", "auto_paint=11"),
        ],
    ),
    (
        "size",
        &[
            ("compact", "auto_size=1"),
            ("full-size", "auto_size=2"),
            ("mid-size", "auto_size=3"),
            ("sub-compact", "auto_size=4"),
        ],
    ),
    (
        "title-status",
        &[
            ("clean", "auto_title_status=1"),
            ("salvage", "auto_title_status=2"),
            ("rebuilt", "auto_title_status=3"),
            ("parts-only", "auto_title_status=4"),
            ("lien", "auto_title_status=5"),
            ("missing", "auto_title_status=6"),
        ],
    ),
    (
        "transmission",
        &[
            ("manual", "auto_transmission=1"),
            ("automatic", "auto_transmission=2"),
            ("other", "auto_transmission=3"),
        ],
    ),
    (
        "type",
        &[
            ("bus", "auto_bodytype=1"),
            ("convertible", "auto_bodytype=2"),
            ("coupe", "auto_bodytype=3"),
            ("hatchback", "auto_bodytype=4"),
            ("mini-van", "auto_bodytype=5"),
            ("offroad", "auto_bodytype=6"),
            ("pickup", "auto_bodytype=7"),
            ("sedan", "auto_bodytype=8"),
            ("truck", "auto_bodytype=9"),
            ("SUV", "auto_bodytype=10"),
            ("wagon", "auto_bodytype=11"),
            ("van", "auto_bodytype=12"),
            ("other", "auto_bodytype=13"),
        ],
    ),
];

/// Range option name → query-parameter name.
const RANGE_OPTIONS: &[(&str, &str)] = &[
    ("search_distance", "search_distance"),
    ("postal_code", "postal"),
    ("min_price", "min_price"),
    ("max_price", "max_price"),
    ("min_auto_year", "min_auto_year"),
    ("max_auto_year", "max_auto_year"),
    ("min_miles", "min_auto_miles"),
    ("max_miles", "max_auto_miles"),
];

/// Resolve static and variable options into query fragments.
///
/// Static options are processed first, in input order, then variable options,
/// in input order; the output preserves that ordering. Unknown flag names,
/// unknown groups, values absent from a group's table, and unknown range
/// names are dropped silently; a bad entry never stops processing of the
/// remaining entries.
#[must_use]
pub fn resolve_options(static_opts: &[StaticOption], var_opts: &[VarOption]) -> Vec<String> {
    let mut fragments = Vec::with_capacity(static_opts.len() + var_opts.len());

    for option in static_opts {
        match option {
            StaticOption::Flag(name) => match lookup(FLAG_OPTIONS, name) {
                Some(fragment) => fragments.push(fragment.to_owned()),
                None => tracing::debug!(flag = %name, "dropping unknown flag option"),
            },
            StaticOption::Choice { group, value } => {
                let fragment = CHOICE_GROUPS
                    .iter()
                    .find(|(name, _)| *name == group.as_str())
                    .and_then(|(_, values)| lookup(values, value));
                match fragment {
                    Some(fragment) => fragments.push(fragment.to_owned()),
                    None => {
                        tracing::debug!(group = %group, value = %value, "dropping unknown choice option");
                    }
                }
            }
        }
    }

    for option in var_opts {
        match lookup(RANGE_OPTIONS, &option.name) {
            Some(param) => fragments.push(format!("{param}={}", option.amount)),
            None => tracing::debug!(name = %option.name, "dropping unknown range option"),
        }
    }

    fragments
}

fn lookup<'a>(table: &[(&str, &'a str)], key: &str) -> Option<&'a str> {
    table
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, value)| *value)
}

#[cfg(test)]
#[path = "options_test.rs"]
mod tests;
