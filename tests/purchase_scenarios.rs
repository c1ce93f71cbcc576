use proptest::prelude::*;

use ticket_service::mocks::{CallLog, GatewayCall, RecordingPaymentService, RecordingSeatService};
use ticket_service::{AccountId, InvalidPurchase, PurchaseError, TicketService, TicketType, TicketTypeRequest};

type Service = TicketService<RecordingPaymentService, RecordingSeatService>;

fn service() -> (Service, CallLog) {
    let log = CallLog::default();
    let svc = TicketService::new(RecordingPaymentService::new(log.clone()), RecordingSeatService::new(log.clone()));
    (svc, log)
}

fn adult(n: u32) -> TicketTypeRequest { TicketTypeRequest::new(TicketType::Adult, n) }
fn child(n: u32) -> TicketTypeRequest { TicketTypeRequest::new(TicketType::Child, n) }
fn infant(n: u32) -> TicketTypeRequest { TicketTypeRequest::new(TicketType::Infant, n) }

fn acc(n: i64) -> AccountId { AccountId::new(n).unwrap() }

fn assert_booked(account: i64, requests: &[TicketTypeRequest], amount: u64, seats: u64) {
    let (svc, log) = service();
    svc.purchase_tickets(account, requests).unwrap();
    assert_eq!(
        log.calls(),
        vec![GatewayCall::Payment(acc(account), amount), GatewayCall::Seats(acc(account), seats)]
    );
}

fn assert_rejected(account: i64, requests: &[TicketTypeRequest]) -> InvalidPurchase {
    let (svc, log) = service();
    let err = svc.purchase_tickets(account, requests).unwrap_err();
    assert!(log.calls().is_empty(), "collaborators called on rejection: {:?}", log.calls());
    match err {
        PurchaseError::Invalid(e) => e,
        other => panic!("expected InvalidPurchase, got {other:?}"),
    }
}

#[test]
fn one_adult() {
    assert_booked(1, &[adult(1)], 25, 1);
}

#[test]
fn two_adults_one_child_one_infant() {
    assert_booked(2, &[adult(2), child(1), infant(1)], 65, 3);
}

#[test]
fn many_children_with_one_adult() {
    assert_booked(3, &[adult(1), child(5)], 100, 6);
}

#[test]
fn infants_equal_to_adults() {
    assert_booked(4, &[adult(2), infant(2)], 50, 2);
}

#[test]
fn split_requests_of_same_type_are_summed() {
    assert_booked(10, &[child(2), adult(1), adult(1), infant(0)], 80, 4);
}

#[test]
fn rejects_non_positive_account() {
    assert!(matches!(assert_rejected(0, &[adult(1)]), InvalidPurchase::InvalidAccountId(_)));
    assert!(matches!(assert_rejected(-1, &[adult(1)]), InvalidPurchase::InvalidAccountId(_)));
}

#[test]
fn rejects_empty_request_list() {
    assert_eq!(assert_rejected(5, &[]), InvalidPurchase::NoRequests);
}

#[test]
fn rejects_all_zero_counts() {
    assert_eq!(assert_rejected(5, &[adult(0), child(0)]), InvalidPurchase::NoTickets);
}

#[test]
fn rejects_more_than_25() {
    assert_eq!(assert_rejected(6, &[adult(26)]), InvalidPurchase::TooManyTickets { requested: 26 });
}

#[test]
fn rejects_children_without_adult() {
    assert_eq!(assert_rejected(7, &[child(2)]), InvalidPurchase::UnaccompaniedMinor);
}

#[test]
fn rejects_infants_without_adult() {
    assert_eq!(assert_rejected(8, &[infant(1)]), InvalidPurchase::UnaccompaniedMinor);
}

#[test]
fn rejects_infants_exceeding_adults() {
    assert_eq!(
        assert_rejected(9, &[adult(1), infant(2)]),
        InvalidPurchase::InfantsExceedAdults { infants: 2, adults: 1 }
    );
}

#[test]
fn rejection_messages_are_readable() {
    let err = assert_rejected(6, &[adult(26)]);
    assert!(err.to_string().contains("more than 25 tickets"));
    let err = assert_rejected(7, &[child(1)]);
    assert!(err.to_string().contains("at least one Adult"));
}

#[test]
fn service_is_reusable_across_calls() {
    let (svc, log) = service();
    svc.purchase_tickets(1, &[adult(1)]).unwrap();
    assert!(svc.purchase_tickets(2, &[child(1)]).is_err());
    svc.purchase_tickets(3, &[adult(1), child(1)]).unwrap();
    assert_eq!(
        log.calls(),
        vec![
            GatewayCall::Payment(acc(1), 25),
            GatewayCall::Seats(acc(1), 1),
            GatewayCall::Payment(acc(3), 40),
            GatewayCall::Seats(acc(3), 2),
        ]
    );
}

fn party() -> impl Strategy<Value = (u32, u32, u32)> {
    (0u32..30, 0u32..30, 0u32..30)
}

/// Adults first, then children within the cap, then infants up to one per adult.
fn valid_party() -> impl Strategy<Value = (u32, u32, u32)> {
    (1u32..=25)
        .prop_flat_map(|adults| (Just(adults), 0u32..=(25 - adults)))
        .prop_flat_map(|(adults, children)| (Just(adults), Just(children), 0u32..=adults.min(25 - adults - children)))
}

proptest! {
    #[test]
    fn valid_parties_are_priced_and_seated((adults, children, infants) in valid_party(), account in 1i64..10_000) {
        let (svc, log) = service();
        svc.purchase_tickets(account, &[adult(adults), child(children), infant(infants)]).unwrap();

        let amount = 25 * u64::from(adults) + 15 * u64::from(children);
        let seats = u64::from(adults) + u64::from(children);
        prop_assert_eq!(
            log.calls(),
            vec![GatewayCall::Payment(acc(account), amount), GatewayCall::Seats(acc(account), seats)]
        );
    }

    #[test]
    fn invalid_parties_never_reach_collaborators((adults, children, infants) in party(), account in 1i64..10_000) {
        let total = adults + children + infants;
        let valid = total >= 1 && total <= 25 && adults >= 1 && infants <= adults;
        prop_assume!(!valid);

        let (svc, log) = service();
        let result = svc.purchase_tickets(account, &[adult(adults), child(children), infant(infants)]);
        prop_assert!(matches!(result, Err(PurchaseError::Invalid(_))));
        prop_assert!(log.calls().is_empty());
    }

    #[test]
    fn bad_accounts_never_reach_collaborators(account in i64::MIN..=0, n in 1u32..5) {
        let (svc, log) = service();
        let result = svc.purchase_tickets(account, &[adult(n)]);
        prop_assert!(matches!(result, Err(PurchaseError::Invalid(InvalidPurchase::InvalidAccountId(_)))));
        prop_assert!(log.calls().is_empty());
    }
}
