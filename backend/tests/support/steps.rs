//! Given steps shared by the fruit and comment suites.

use rstest_bdd_macros::given;

use super::harness::{WorldFixture, create_fruit, log_in};

#[given("a running orchard server")]
fn a_running_orchard_server(world: &WorldFixture) {
    let _ = world;
}

#[given("alice is logged in")]
fn alice_is_logged_in(world: &WorldFixture) {
    log_in(&world.world(), "alice");
}

#[given("bob is logged in")]
fn bob_is_logged_in(world: &WorldFixture) {
    log_in(&world.world(), "bob");
}

#[given("alice owns a fruit named Mango")]
fn alice_owns_a_fruit_named_mango(world: &WorldFixture) {
    let outcome = create_fruit(&world.world(), "alice", "Mango");
    assert_eq!(outcome.status, 201);
}
