//! Data-driven normalization rules.
//!
//! Everything the normalizer needs to know about the monitored network is
//! immutable configuration data: the supported routes, the stops to skip,
//! the renamed-stop overrides, and how shared feed ids split into physical
//! branches.

use hashbrown::HashSet;

use crate::RouteId;

/// Splits one shared feed route id into physically distinct branches.
#[derive(Debug, Clone)]
pub struct BranchSplit {
    /// Lowercased route id the feed reports for every branch.
    pub route_id: RouteId,
    /// Branch membership rules in priority order: a trip belongs to the
    /// first branch whose member set intersects its stop sequence.
    pub branches: Vec<BranchRule>,
    /// Branch assigned to trips whose stop sequence matches no member set.
    pub fallback: Option<RouteId>,
}

/// Membership test identifying one branch of a split route.
#[derive(Debug, Clone)]
pub struct BranchRule {
    pub branch_id: RouteId,
    /// Stop codes exclusive to this branch.
    pub member_stop_codes: HashSet<String>,
}

/// Immutable rule set driving the feed normalizer.
#[derive(Debug, Clone)]
pub struct FeedRules {
    /// Raw feed route ids to keep; everything else is dropped.
    pub supported_routes: HashSet<String>,
    /// Stop ids dropped outright (non-revenue or layover stops).
    pub ignored_stop_ids: HashSet<String>,
    /// Free-text fragments overriding the raw stop field for historically
    /// renamed stops. Checked in declaration order, first match wins.
    pub stop_aliases: Vec<(String, String)>,
    pub branch_splits: Vec<BranchSplit>,
}

impl FeedRules {
    /// Rule set for the MBTA rapid transit network.
    ///
    /// The red line reports a single `Red` id for both the Ashmont and
    /// Braintree branches; trips are told apart by the Braintree-side stop
    /// codes in their scheduled stop sequence.
    pub fn mbta() -> Self {
        let red_a_stop_codes = [
            "334", "70093", "70094", "70261", "70091", "70092", "323", "70089", "70090", "70087",
            "70088",
        ];

        Self {
            supported_routes: [
                "Blue", "Red", "Orange", "Green-B", "Green-C", "Green-D", "Green-E",
            ]
            .into_iter()
            .map(str::to_owned)
            .collect(),
            ignored_stop_ids: ["71199"].into_iter().map(str::to_owned).collect(),
            stop_aliases: [
                ("Braintree", "38671"),
                ("Oak Grove", "70036"),
                ("Union Square", "70503"),
                ("Alewife", "141"),
                ("Forest Hills", "10642"),
            ]
            .into_iter()
            .map(|(fragment, code)| (fragment.to_owned(), code.to_owned()))
            .collect(),
            branch_splits: vec![BranchSplit {
                route_id: "red".to_owned(),
                branches: vec![BranchRule {
                    branch_id: "red-a".to_owned(),
                    member_stop_codes: red_a_stop_codes
                        .into_iter()
                        .map(str::to_owned)
                        .collect(),
                }],
                fallback: Some("red-b".to_owned()),
            }],
        }
    }
}
