//! EPA national primary drinking water regulations (40 CFR Part 141),
//! as the built-in limit and requirement tables.
//!
//! Public-notification tiers follow 40 CFR 141.201 Table 1: acute
//! microbial and nitrate violations are Tier 1, other MCL and action-level
//! exceedances Tier 2.

use sdwa_core::parameter::names;
use sdwa_core::{Parameter, Tier};

use crate::limits::{LimitKind, LimitTable, RegulatoryLimit, SeverityRationale};
use crate::requirements::{Deadline, NotificationRequirement, RequirementTable};

/// Built-in limit table.
pub fn epa_limits() -> LimitTable {
    vec![
        RegulatoryLimit::zero_tolerance(Parameter::from_static(names::E_COLI), Tier::Tier1)
            .with_health_effects(
                "E. coli are bacteria whose presence indicates that the water may be contaminated \
                 with human or animal wastes. These pathogens may cause short-term effects such \
                 as diarrhea, cramps, nausea, and headaches.",
            ),
        RegulatoryLimit::zero_tolerance(Parameter::from_static(names::TOTAL_COLIFORM), Tier::Tier1)
            .with_health_effects(
                "Coliforms are bacteria that are naturally present in the environment and are \
                 used as an indicator that other, potentially harmful, waterborne pathogens may \
                 be present or that a potential pathway exists through which contamination may \
                 enter the drinking water distribution system.",
            ),
        RegulatoryLimit::numeric(
            Parameter::from_static(names::LEAD),
            15.0,
            LimitKind::ActionLevel,
            Tier::Tier2,
            "ppb",
        )
        .with_high_threshold(2.0)
        .with_rationale(SeverityRationale::new("Significant health risk", "Health concern")),
        RegulatoryLimit::numeric(
            Parameter::from_static(names::COPPER),
            1300.0,
            LimitKind::ActionLevel,
            Tier::Tier2,
            "ppb",
        )
        .with_high_threshold(1.5)
        .with_rationale(SeverityRationale::new(
            "Corrosion control failure",
            "Corrosion monitoring required",
        )),
        RegulatoryLimit::numeric(
            Parameter::from_static(names::PFOA),
            4.0,
            LimitKind::Mcl,
            Tier::Tier2,
            "ng/L",
        )
        .with_high_threshold(2.0)
        .with_rationale(SeverityRationale::new("Persistent contamination", "Monitoring required")),
        RegulatoryLimit::numeric(
            Parameter::from_static(names::PFOS),
            4.0,
            LimitKind::Mcl,
            Tier::Tier2,
            "ng/L",
        )
        .with_rationale(SeverityRationale::new("Persistent contamination", "Monitoring required"))
        .with_health_effects(
            "PFOS is a synthetic chemical that has been used in industry and consumer products. \
             Some people who drink water containing PFOS in excess of the MCL over many years \
             may experience increased risk of certain health effects.",
        ),
        RegulatoryLimit::numeric(
            Parameter::from_static(names::NITRATE),
            10.0,
            LimitKind::Mcl,
            Tier::Tier1,
            "mg/L",
        )
        .with_rationale(SeverityRationale::new("Acute infant health risk", "Health concern"))
        .with_health_effects(
            "Infants below the age of six months who drink water containing nitrate in excess \
             of the MCL could become seriously ill and, if untreated, may die. Symptoms include \
             shortness of breath and blue-baby syndrome.",
        ),
        RegulatoryLimit::numeric(
            Parameter::from_static(names::ARSENIC),
            10.0,
            LimitKind::Mcl,
            Tier::Tier2,
            "ppb",
        )
        .with_health_effects(
            "Some people who drink water containing arsenic in excess of the MCL over many years \
             could experience skin damage or problems with their circulatory system, and may \
             have an increased risk of getting cancer.",
        ),
        RegulatoryLimit::numeric(
            Parameter::from_static(names::TTHM),
            80.0,
            LimitKind::Mcl,
            Tier::Tier2,
            "ppb",
        )
        .with_health_effects(
            "Some people who drink water containing trihalomethanes in excess of the MCL over \
             many years may experience problems with their liver, kidneys, or central nervous \
             system, and may have an increased risk of getting cancer.",
        ),
    ]
    .into()
}

/// Built-in requirement table.
pub fn epa_requirements() -> RequirementTable {
    vec![
        NotificationRequirement::new(
            Tier::Tier1,
            Deadline::hours(24),
            &["Public Notice", "Direct Contact", "Media Alert"],
        ),
        NotificationRequirement::new(Tier::Tier2, Deadline::days(30), &["Public Notice", "Newspaper"]),
        NotificationRequirement::new(Tier::Tier3, Deadline::years(1), &["Annual Report"]),
    ]
    .into()
}
