//! Benchmark planning domains.
//!
//! The classical textbook problems, expressed in the textual schema
//! notation. Typed domains route through [`PlanningProblem::with_typing`]
//! so their grounding stays tractable; the rest enumerate over every
//! object the initial state and goals mention.

use logic::ParseError;

use crate::action::Action;
use crate::problem::PlanningProblem;

/// Registry of the built-in domains, in presentation order.
pub const DOMAINS: [(&str, fn() -> Result<PlanningProblem, ParseError>); 8] = [
    ("air-cargo", air_cargo),
    ("spare-tire", spare_tire),
    ("three-block-tower", three_block_tower),
    ("simple-blocks-world", simple_blocks_world),
    ("have-cake", have_cake_and_eat_cake_too),
    ("shopping", shopping_problem),
    ("socks-and-shoes", socks_and_shoes),
    ("double-tennis", double_tennis_problem),
];

pub fn by_name(name: &str) -> Option<Result<PlanningProblem, ParseError>> {
    DOMAINS
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, build)| build())
}

/// Air-cargo shipment between two airports with two planes.
pub fn air_cargo() -> Result<PlanningProblem, ParseError> {
    PlanningProblem::with_typing(
        "At(C1, SFO) & At(C2, JFK) & At(P1, SFO) & At(P2, JFK)",
        "At(C1, JFK) & At(C2, SFO)",
        vec![
            Action::parse(
                "Load(c, p, a)",
                "At(c, a) & At(p, a)",
                "In(c, p) & ~At(c, a)",
            )?
            .with_typing("Cargo(c) & Plane(p) & Airport(a)")?,
            Action::parse(
                "Unload(c, p, a)",
                "In(c, p) & At(p, a)",
                "At(c, a) & ~In(c, p)",
            )?
            .with_typing("Cargo(c) & Plane(p) & Airport(a)")?,
            Action::parse("Fly(p, f, to)", "At(p, f)", "At(p, to) & ~At(p, f)")?
                .with_typing("Plane(p) & Airport(f) & Airport(to)")?,
        ],
        "Cargo(C1) & Cargo(C2) & Plane(P1) & Plane(P2) & Airport(SFO) & Airport(JFK)",
    )
}

/// Replacing a flat tire with the spare from the trunk.
pub fn spare_tire() -> Result<PlanningProblem, ParseError> {
    PlanningProblem::with_typing(
        "At(Flat, Axle) & At(Spare, Trunk)",
        "At(Spare, Axle) & At(Flat, Ground)",
        vec![
            Action::parse(
                "Remove(obj, loc)",
                "At(obj, loc)",
                "At(obj, Ground) & ~At(obj, loc)",
            )?
            .with_typing("Tire(obj)")?,
            Action::parse(
                "PutOn(t, Axle)",
                "At(t, Ground) & ~At(Flat, Axle)",
                "At(t, Axle) & ~At(t, Ground)",
            )?
            .with_typing("Tire(t)")?,
            Action::parse(
                "LeaveOvernight",
                "",
                "~At(Spare, Ground) & ~At(Spare, Axle) & ~At(Spare, Trunk) & \
                 ~At(Flat, Ground) & ~At(Flat, Axle) & ~At(Flat, Trunk)",
            )?,
        ],
        "Tire(Flat) & Tire(Spare)",
    )
}

/// The Sussman Anomaly: restack three blocks into a tower.
pub fn three_block_tower() -> Result<PlanningProblem, ParseError> {
    PlanningProblem::with_typing(
        "On(A, Table) & On(B, Table) & On(C, A) & Clear(B) & Clear(C)",
        "On(A, B) & On(B, C)",
        vec![
            Action::parse(
                "Move(b, x, y)",
                "On(b, x) & Clear(b) & Clear(y)",
                "On(b, y) & Clear(x) & ~On(b, x) & ~Clear(y)",
            )?
            .with_typing("Block(b) & Block(y)")?,
            Action::parse(
                "MoveToTable(b, x)",
                "On(b, x) & Clear(b)",
                "On(b, Table) & Clear(x) & ~On(b, x)",
            )?
            .with_typing("Block(b) & Block(x)")?,
        ],
        "Block(A) & Block(B) & Block(C)",
    )
}

/// The Sussman Anomaly without an explicit table object.
pub fn simple_blocks_world() -> Result<PlanningProblem, ParseError> {
    PlanningProblem::new(
        "On(A, B) & Clear(A) & OnTable(B) & OnTable(C) & Clear(C)",
        "On(B, A) & On(C, B)",
        vec![
            Action::parse(
                "ToTable(x, y)",
                "On(x, y) & Clear(x)",
                "~On(x, y) & Clear(y) & OnTable(x)",
            )?,
            Action::parse(
                "FromTable(y, x)",
                "OnTable(y) & Clear(y) & Clear(x)",
                "~OnTable(y) & ~Clear(x) & On(y, x)",
            )?,
        ],
    )
}

/// Have a cake and have eaten one too. Needs `Bake`, which only fires
/// once the cake is gone; a hard problem for a non-backtracking search.
pub fn have_cake_and_eat_cake_too() -> Result<PlanningProblem, ParseError> {
    PlanningProblem::new(
        "Have(Cake)",
        "Have(Cake) & Eaten(Cake)",
        vec![
            Action::parse("Eat(Cake)", "Have(Cake)", "Eaten(Cake) & ~Have(Cake)")?,
            Action::parse("Bake(Cake)", "~Have(Cake)", "Have(Cake)")?,
        ],
    )
}

/// Acquire items sold at different stores.
pub fn shopping_problem() -> Result<PlanningProblem, ParseError> {
    PlanningProblem::with_typing(
        "At(Home) & Sells(SM, Milk) & Sells(SM, Banana) & Sells(HW, Drill)",
        "Have(Milk) & Have(Banana) & Have(Drill)",
        vec![
            Action::parse("Buy(x, store)", "At(store) & Sells(store, x)", "Have(x)")?
                .with_typing("Store(store) & Item(x)")?,
            Action::parse("Go(x, y)", "At(x)", "At(y) & ~At(x)")?
                .with_typing("Place(x) & Place(y)")?,
        ],
        "Place(Home) & Place(SM) & Place(HW) & Store(SM) & Store(HW) & \
         Item(Milk) & Item(Banana) & Item(Drill)",
    )
}

/// Put on socks and shoes; the sock/shoe pairs for the two feet are
/// independent, so solutions stay partially ordered.
pub fn socks_and_shoes() -> Result<PlanningProblem, ParseError> {
    PlanningProblem::new(
        "",
        "RightShoeOn & LeftShoeOn",
        vec![
            Action::parse("RightShoe", "RightSockOn", "RightShoeOn")?,
            Action::parse("RightSock", "", "RightSockOn")?,
            Action::parse("LeftShoe", "LeftSockOn", "LeftShoeOn")?,
            Action::parse("LeftSock", "", "LeftSockOn")?,
        ],
    )
}

/// Two tennis partners returning an approaching ball and repositioning.
/// The goals quantify over an actor variable, so this one exercises the
/// schema machinery rather than the ground search.
pub fn double_tennis_problem() -> Result<PlanningProblem, ParseError> {
    PlanningProblem::new(
        "At(A, LeftBaseLine) & At(B, RightNet) & Approaching(Ball, RightBaseLine) & \
         Partner(A, B) & Partner(B, A)",
        "Returned(Ball) & At(a, LeftNet) & At(a, RightNet)",
        vec![
            Action::parse(
                "Hit(actor, Ball, loc)",
                "Approaching(Ball, loc) & At(actor, loc)",
                "Returned(Ball)",
            )?,
            Action::parse(
                "Go(actor, to, loc)",
                "At(actor, loc)",
                "At(actor, to) & ~At(actor, loc)",
            )?,
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use logic::parse_literal;
    use pretty_assertions::assert_eq;

    fn act(problem: &mut PlanningProblem, call: &str) {
        problem.act(&parse_literal(call).unwrap()).unwrap();
    }

    #[test]
    fn test_registry_builds_every_domain() {
        for (name, build) in DOMAINS {
            assert!(build().is_ok(), "domain {name} failed to build");
        }
        assert!(by_name("air-cargo").is_some());
        assert!(by_name("four-block-tower").is_none());
    }

    #[test]
    fn test_air_cargo_act_sequence() {
        let mut ac = air_cargo().unwrap();
        assert!(!ac.goal_test());
        act(&mut ac, "Load(C2, P2, JFK)");
        act(&mut ac, "Load(C1, P1, SFO)");
        act(&mut ac, "Fly(P1, SFO, JFK)");
        act(&mut ac, "Fly(P2, JFK, SFO)");
        act(&mut ac, "Unload(C2, P2, SFO)");
        assert!(!ac.goal_test());
        act(&mut ac, "Unload(C1, P1, JFK)");
        assert!(ac.goal_test());
    }

    #[test]
    fn test_air_cargo_grounding_counts() {
        let ac = air_cargo().unwrap();
        // 6 objects; typing cuts the permutations down to the sensible
        // Load/Unload/Fly instances.
        assert_eq!(ac.expand_actions().len(), 20);
        assert_eq!(ac.expand_fluents().len(), 18);
    }

    #[test]
    fn test_spare_tire_act_sequence() {
        let mut st = spare_tire().unwrap();
        act(&mut st, "Remove(Spare, Trunk)");
        act(&mut st, "Remove(Flat, Axle)");
        assert!(!st.goal_test());
        act(&mut st, "PutOn(Spare, Axle)");
        assert!(st.goal_test());
    }

    #[test]
    fn test_three_block_tower_act_sequence() {
        let mut tbt = three_block_tower().unwrap();
        act(&mut tbt, "MoveToTable(C, A)");
        act(&mut tbt, "Move(B, Table, C)");
        assert!(!tbt.goal_test());
        act(&mut tbt, "Move(A, Table, B)");
        assert!(tbt.goal_test());
    }

    #[test]
    fn test_three_block_tower_grounding_count() {
        let tbt = three_block_tower().unwrap();
        assert_eq!(tbt.expand_actions().len(), 18);
    }

    #[test]
    fn test_simple_blocks_world_act_sequence() {
        let mut sbw = simple_blocks_world().unwrap();
        act(&mut sbw, "ToTable(A, B)");
        act(&mut sbw, "FromTable(B, A)");
        assert!(!sbw.goal_test());
        act(&mut sbw, "FromTable(C, B)");
        assert!(sbw.goal_test());
    }

    #[test]
    fn test_simple_blocks_world_grounding_counts() {
        let sbw = simple_blocks_world().unwrap();
        // Untyped: both schemas over all ordered pairs of {A, B, C}.
        assert_eq!(sbw.expand_actions().len(), 12);
        assert_eq!(sbw.expand_fluents().len(), 12);
    }

    #[test]
    fn test_have_cake_act_sequence() {
        let mut cp = have_cake_and_eat_cake_too().unwrap();
        act(&mut cp, "Eat(Cake)");
        assert!(!cp.goal_test());
        act(&mut cp, "Bake(Cake)");
        assert!(cp.goal_test());
    }

    #[test]
    fn test_shopping_act_sequence() {
        let mut sp = shopping_problem().unwrap();
        act(&mut sp, "Go(Home, HW)");
        act(&mut sp, "Buy(Drill, HW)");
        act(&mut sp, "Go(HW, SM)");
        act(&mut sp, "Buy(Banana, SM)");
        assert!(!sp.goal_test());
        act(&mut sp, "Buy(Milk, SM)");
        assert!(sp.goal_test());
    }

    #[test]
    fn test_socks_and_shoes_act_sequence() {
        let mut ss = socks_and_shoes().unwrap();
        act(&mut ss, "RightSock");
        act(&mut ss, "RightShoe");
        act(&mut ss, "LeftSock");
        assert!(!ss.goal_test());
        act(&mut ss, "LeftShoe");
        assert!(ss.goal_test());
    }

    #[test]
    fn test_double_tennis_returns_ball() {
        let mut dtp = double_tennis_problem().unwrap();
        assert!(dtp.is_strips());
        act(&mut dtp, "Go(A, RightBaseLine, LeftBaseLine)");
        act(&mut dtp, "Hit(A, Ball, RightBaseLine)");
        assert!(dtp
            .initial()
            .holds(&parse_literal("Returned(Ball)").unwrap()));
    }
}
