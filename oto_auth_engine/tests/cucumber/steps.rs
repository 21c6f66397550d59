use cucumber::{given, then, when};
use oto_auth_engine::{helpers::SignatureCodec, CredentialSet, TransactionAuthRequest};

use crate::cucumber::AuthWorld;

#[given(expr = "member {string} with pin {string} and password {string} allowed from {string}")]
fn configure_member(world: &mut AuthWorld, memberid: String, pin: String, password: String, address: String) {
    world.credentials = CredentialSet::new(memberid, pin, password).with_allowed_address(address);
}

#[given("IP checks are enabled")]
fn enable_ip_checks(world: &mut AuthWorld) {
    world.credentials.allow_ip_check_override = true;
}

#[given("IP checks are disabled")]
fn disable_ip_checks(world: &mut AuthWorld) {
    world.credentials.allow_ip_check_override = false;
}

#[when(expr = "member {string} requests transaction {string} for product {string} to {string} from {string}")]
fn new_request(world: &mut AuthWorld, memberid: String, trxid: String, product: String, dest: String, address: String) {
    world.request = TransactionAuthRequest::new(trxid, memberid, dest, product);
    world.caller_address = address;
}

#[when(expr = "the request carries pin {string} and password {string}")]
fn with_pin_password(world: &mut AuthWorld, pin: String, password: String) {
    world.request = world.request.clone().with_pin_password(pin, password);
}

#[when(expr = "the request carries the signature {string}")]
fn with_signature(world: &mut AuthWorld, signature: String) {
    world.request = world.request.clone().with_signature(signature);
}

#[when(expr = "the request carries a signature made with pin {string} and password {string}")]
fn with_computed_signature(world: &mut AuthWorld, pin: String, password: String) {
    let r = &world.request;
    let signature = SignatureCodec::compute(&r.memberid, &r.product, &r.dest, &r.trxid, &pin, &password);
    world.request = world.request.clone().with_signature(signature);
}

#[when("the gateway authenticates the request")]
fn authenticate(world: &mut AuthWorld) {
    world.authenticate();
}

#[then(expr = "the request is rejected with {word} and status {int}")]
fn rejected(world: &mut AuthWorld, rc: String, status: u16) {
    let err = world.outcome().as_ref().expect_err("Expected the request to be rejected");
    let failure = err.failure().expect("Expected an authentication failure");
    assert_eq!(failure.rc(), rc);
    assert_eq!(failure.status_code(), status);
}

#[then("the request succeeds with the computed signature")]
fn succeeds_with_computed_signature(world: &mut AuthWorld) {
    let success = world.outcome().as_ref().expect("Expected the request to succeed");
    let r = &world.request;
    let (pin, password) = (r.pin.as_deref().unwrap_or_default(), r.password.as_deref().unwrap_or_default());
    let expected = SignatureCodec::compute(&r.memberid, &r.product, &r.dest, &r.trxid, pin, password);
    assert_eq!(success.signature, expected);
    assert_eq!(success.trxid, r.trxid);
    assert_eq!(success.memberid, r.memberid);
}

#[then("the returned signature equals the supplied signature")]
fn returns_supplied_signature(world: &mut AuthWorld) {
    let success = world.outcome().as_ref().expect("Expected the request to succeed");
    assert_eq!(Some(&success.signature), world.request.signature.as_ref());
}
