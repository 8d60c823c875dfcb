use rentsplit_calculator::{
    Bill, BillScenario, CalculationWeights, Occupant, Reconciliation, Room, ShareResult,
    expected_total, split_bill, split_bill_detailed,
};

const EPS: f64 = 1e-9;

fn bill(amount: f64) -> Bill {
    Bill { amount, ..Bill::default() }
}

fn assert_share(result: &ShareResult, name: &str, expected: f64) {
    assert_eq!(result.name, name);
    assert!(
        (result.share - expected).abs() < EPS,
        "{name}: expected {expected}, got {}",
        result.share
    );
}

#[test]
fn single_occupant_pays_the_whole_bill() {
    let rooms = vec![Room::new("Only", 2.0).with_occupant(Occupant::new("Ann", 30))];

    let results = split_bill(&rooms, &bill(1000.0), &CalculationWeights::new(0.4, 0.6));

    assert_eq!(results.len(), 1);
    assert_share(&results[0], "Ann", 1000.0);
}

#[test]
fn two_rooms_split_by_area_and_presence() {
    let rooms = vec![
        Room::new("A", 2.0).with_occupant(Occupant::new("Ann", 30)),
        Room::new("B", 2.0).with_occupant(Occupant::new("Bob", 15)),
    ];

    let results = split_bill(&rooms, &bill(900.0), &CalculationWeights::new(0.5, 0.5));

    assert_eq!(results.len(), 2);
    assert_share(&results[0], "Ann", 525.0);
    assert_share(&results[1], "Bob", 375.0);
    assert!(Reconciliation::new(&results, 900.0).is_balanced());
}

#[test]
fn zero_amount_produces_nothing() {
    let rooms = vec![Room::new("A", 2.0).with_occupant(Occupant::new("Ann", 30))];
    let weights = CalculationWeights::default();

    assert!(split_bill(&rooms, &bill(0.0), &weights).is_empty());
    assert!(split_bill(&rooms, &bill(-50.0), &weights).is_empty());
}

#[test]
fn scenario_without_a_bill_produces_nothing() {
    let scenario: BillScenario = serde_json::from_str(
        r#"{"rooms":[{"name":"A","area":2,"occupants":[{"name":"Ann","daysPresent":30}]}]}"#,
    )
    .unwrap();

    let results = split_bill(&scenario.rooms, &scenario.bill, &scenario.weights);

    assert!(results.is_empty());
}

#[test]
fn zero_total_area_produces_nothing() {
    let rooms = vec![
        Room::new("A", 0.0).with_occupant(Occupant::new("Ann", 30)),
        Room::new("B", 0.0).with_occupant(Occupant::new("Bob", 10)),
    ];

    assert!(split_bill(&rooms, &bill(500.0), &CalculationWeights::default()).is_empty());
}

#[test]
fn nobody_present_produces_nothing() {
    let rooms = vec![
        Room::new("A", 2.0).with_occupant(Occupant::new("Ann", 0)),
        Room::new("B", 1.0).with_occupant(Occupant::new("Bob", 0)),
    ];

    assert!(split_bill(&rooms, &bill(500.0), &CalculationWeights::default()).is_empty());
}

#[test]
fn no_rooms_produces_nothing() {
    assert!(split_bill(&[], &bill(500.0), &CalculationWeights::default()).is_empty());
    assert!(split_bill_detailed(&[], &bill(500.0), &CalculationWeights::default()).is_none());
}

#[test]
fn idle_room_splits_its_area_cost_equally() {
    let rooms = vec![
        Room::new("Busy", 1.0).with_occupant(Occupant::new("Ann", 30)),
        Room::new("Idle", 3.0)
            .with_occupant(Occupant::new("Bob", 0))
            .with_occupant(Occupant::new("Cid", 0)),
    ];

    let results = split_bill(&rooms, &bill(800.0), &CalculationWeights::new(0.5, 0.5));

    assert_eq!(results.len(), 3);
    assert_share(&results[0], "Ann", 500.0);
    assert_share(&results[1], "Bob", 150.0);
    assert_share(&results[2], "Cid", 150.0);
}

#[test]
fn empty_room_takes_area_but_yields_no_rows() {
    let rooms = vec![
        Room::new("Lived in", 1.0).with_occupant(Occupant::new("Ann", 30)),
        Room::new("Storage", 1.0),
    ];

    let results = split_bill(&rooms, &bill(1000.0), &CalculationWeights::new(0.4, 0.6));

    // Half of the area pool belongs to the storage room and is charged to nobody
    assert_eq!(results.len(), 1);
    assert_share(&results[0], "Ann", 800.0);
    let rec = Reconciliation::new(&results, 1000.0);
    assert!((rec.difference - 200.0).abs() < EPS);
}

#[test]
fn absent_occupant_pays_nothing_next_to_present_ones() {
    let rooms = vec![
        Room::new("Shared", 2.0)
            .with_occupant(Occupant::new("Ann", 20))
            .with_occupant(Occupant::new("Bob", 0)),
    ];

    let results = split_bill(&rooms, &bill(300.0), &CalculationWeights::default());

    assert_share(&results[0], "Ann", 300.0);
    assert_eq!(results[1].share, 0.0);
}

#[test]
fn weights_are_not_normalized() {
    let rooms = vec![
        Room::new("A", 1.0).with_occupant(Occupant::new("Ann", 10)),
        Room::new("B", 1.0).with_occupant(Occupant::new("Bob", 10)),
    ];
    let bill = bill(1000.0);
    let weights = CalculationWeights::new(0.5, 0.3);

    let results = split_bill(&rooms, &bill, &weights);
    let total: f64 = results.iter().map(|r| r.share).sum();

    assert!((total - 800.0).abs() < EPS);
    assert!((total - expected_total(&bill, &weights)).abs() < EPS);
}

#[test]
fn colliding_and_empty_names_keep_separate_rows() {
    let rooms = vec![
        Room::new("A", 1.0)
            .with_occupant(Occupant::new("", 10))
            .with_occupant(Occupant::new("", 30)),
        Room::new("B", 1.0).with_occupant(Occupant::new("", 20)),
    ];

    let results = split_bill(&rooms, &bill(600.0), &CalculationWeights::default());

    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r.name.is_empty()));
    assert!(results[1].share > results[0].share);
}

#[test]
fn demo_scenario_matches_hand_computation() {
    let scenario = BillScenario::demo();

    let results = split_bill(&scenario.rooms, &scenario.bill, &scenario.weights);

    assert_eq!(results.len(), 4);
    assert_share(&results[0], "First person", 349.473_684_210_526_36);
    assert_share(&results[1], "Second person", 296.140_350_877_193);
    assert_share(&results[2], "Third person", 148.070_175_438_596_5);
    assert_share(&results[3], "Fourth person", 206.315_789_473_684_22);
    assert!(Reconciliation::new(&results, scenario.bill.amount).is_balanced());
}

#[test]
fn detailed_and_plain_results_agree() {
    let scenario = BillScenario::demo();

    let plain = split_bill(&scenario.rooms, &scenario.bill, &scenario.weights);
    let detailed =
        split_bill_detailed(&scenario.rooms, &scenario.bill, &scenario.weights).unwrap();

    assert_eq!(detailed.results(), plain);
    assert!((detailed.area_pool - 400.0).abs() < EPS);
    assert!((detailed.person_days_pool - 600.0).abs() < EPS);
    assert_eq!(detailed.rooms.len(), 3);
}

#[test]
fn repeated_calls_are_bit_identical() {
    let scenario = BillScenario::demo();

    let first = split_bill(&scenario.rooms, &scenario.bill, &scenario.weights);
    let second = split_bill(&scenario.rooms, &scenario.bill, &scenario.weights);

    let bits = |rs: &[ShareResult]| rs.iter().map(|r| r.share.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(&first), bits(&second));
}
