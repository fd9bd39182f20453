//! End-to-end card detection against in-memory EEPROM images.

mod common;

use common::{MemoryCard, NoDelay, PresencePin, card_image, identity_payload, with_header};
use myriad::header::{HEADER_SIZE, MAX_PAYLOAD, SUPPORTED_MINOR};
use myriad::{CardIdentity, Detection, Fault, Layout, Myriad};

fn detect(image: Vec<u8>) -> CardIdentity {
    let mut card = MemoryCard::new(image);
    Myriad::default().detect(&mut PresencePin::seated(), &mut card, &mut NoDelay::default())
}

#[test]
fn switch_card_resolves() {
    let payload = identity_payload(0x0001, 0x0003, 2);
    assert_eq!(payload.len(), 7);
    assert_eq!(detect(card_image(&payload)), CardIdentity::Switches);
}

#[test]
fn ten_byte_payload_with_trailing_record() {
    // identity record followed by an unrelated 1-byte record
    let mut payload = identity_payload(0x0001, 0x0003, 0);
    payload.extend_from_slice(&[0x7f, 0x01, 0xaa]);
    assert_eq!(payload.len(), 10);
    assert_eq!(detect(card_image(&payload)), CardIdentity::Switches);

    let mut payload = identity_payload(0x0001, 0x0002, 0);
    payload.extend_from_slice(&[0x7f, 0x01, 0xaa]);
    assert_eq!(detect(card_image(&payload)), CardIdentity::Joystick);
}

#[test]
fn identity_after_unknown_records() {
    let mut payload = vec![0x10, 0x03, 1, 2, 3, 0x11, 0x00];
    payload.extend(identity_payload(0x0001, 0x0001, 0));
    assert_eq!(detect(card_image(&payload)), CardIdentity::Joystick);
}

#[test]
fn unknown_product_is_unrecognized() {
    let image = card_image(&identity_payload(0x0001, 0x00ff, 0));
    assert_eq!(
        detect(image),
        CardIdentity::Unrecognized { vendor_id: 0x0001, product_id: 0x00ff }
    );
}

#[test]
fn flipped_payload_byte_is_malformed() {
    let mut image = card_image(&identity_payload(0x0001, 0x0003, 0));
    image[HEADER_SIZE + 4] ^= 0x01;
    assert!(matches!(
        detect(image),
        CardIdentity::Malformed(Fault::ChecksumMismatch { .. })
    ));
}

#[test]
fn empty_slot_never_touches_the_bus() {
    let mut card = MemoryCard::new(card_image(&identity_payload(1, 3, 0)));
    let mut pin = PresencePin::empty();
    let identity = Myriad::default().detect(&mut pin, &mut card, &mut NoDelay::default());
    assert_eq!(identity, CardIdentity::Absent);
    assert_eq!(card.reads, 0);
}

#[test]
fn presence_settles_before_sampling() {
    let mut card = MemoryCard::new(Vec::new());
    let mut delay = NoDelay::default();
    Myriad::default().detect(&mut PresencePin::empty(), &mut card, &mut delay);
    assert_eq!(delay.total_ns, 100_000_000);
}

#[test]
fn detection_is_memoized() {
    let mut card = MemoryCard::new(card_image(&identity_payload(1, 3, 0)));
    let mut pin = PresencePin::seated();
    let mut delay = NoDelay::default();
    let mut myriad = Myriad::new(Layout::ELORA);
    assert_eq!(myriad.detection(), Detection::Unknown);

    let first = myriad.detect(&mut pin, &mut card, &mut delay);
    let (reads, pin_reads) = (card.reads, pin.reads);
    assert_eq!(reads, 2);

    // Swap the card contents; the cached answer must not change
    card.image = card_image(&identity_payload(1, 2, 0));
    for _ in 0..3 {
        assert_eq!(myriad.detect(&mut pin, &mut card, &mut delay), first);
    }
    assert_eq!(card.reads, reads);
    assert_eq!(pin.reads, pin_reads);
    assert_eq!(myriad.identity(), Some(CardIdentity::Switches));
}

#[test]
fn bad_magic_is_malformed() {
    let mut image = card_image(&identity_payload(1, 3, 0));
    image[0] = b'X';
    assert_eq!(detect(image), CardIdentity::Malformed(Fault::BadMagic(*b"XYR")));
}

#[test]
fn version_rules() {
    let cases = [
        (0, 0, false),
        (2, 0, false),
        (1, SUPPORTED_MINOR, true),
        (1, SUPPORTED_MINOR + 1, false),
    ];
    for (major, minor, accepted) in cases {
        let mut image = card_image(&identity_payload(1, 3, 0));
        with_header(&mut image, |h| {
            h.major = major;
            h.minor = minor;
        });
        let identity = detect(image);
        assert_eq!(
            identity == CardIdentity::Switches,
            accepted,
            "version {major}.{minor} gave {identity:?}"
        );
    }
}

#[test]
fn oversize_payload_stops_before_second_read() {
    let mut card = MemoryCard::new(card_image(&identity_payload(1, 3, 0)));
    with_header(&mut card.image, |h| h.payload_length = MAX_PAYLOAD as u16 + 1);
    let identity = Myriad::default().detect(
        &mut PresencePin::seated(),
        &mut card,
        &mut NoDelay::default(),
    );
    assert_eq!(
        identity,
        CardIdentity::Malformed(Fault::PayloadTooLarge(MAX_PAYLOAD as u16 + 1))
    );
    assert_eq!(card.reads, 1);
}

#[test]
fn bus_failure_on_either_read_is_malformed() {
    for failing in [0, 1] {
        let mut card = MemoryCard::new(card_image(&identity_payload(1, 3, 0)));
        card.fail_on_read = Some(failing);
        let identity = Myriad::default().detect(
            &mut PresencePin::seated(),
            &mut card,
            &mut NoDelay::default(),
        );
        assert_eq!(identity, CardIdentity::Malformed(Fault::Bus));
        assert_eq!(card.reads, failing + 1, "no retry after a bus error");
    }
}

#[test]
fn missing_identity_is_malformed() {
    let image = card_image(&[0x02, 0x01, 0x00]);
    assert_eq!(detect(image), CardIdentity::Malformed(Fault::IdentityMissing));
}

#[test]
fn wrong_identity_length_is_malformed_with_reason() {
    let image = card_image(&[0x01, 0x04, 0x01, 0x00, 0x03, 0x00]);
    assert_eq!(
        detect(image),
        CardIdentity::Malformed(Fault::IdentityWrongLength(4))
    );
}

#[test]
fn detected_switch_card_drives_matrix() {
    use myriad::port::{AnalogChannel, CardPort, Line};

    struct AllPressed;
    impl CardPort for AllPressed {
        type Error = ();
        fn set_input(&mut self, _: Line) -> Result<(), ()> {
            Ok(())
        }
        fn set_input_pullup(&mut self, _: Line) -> Result<(), ()> {
            Ok(())
        }
        fn is_low(&mut self, _: Line) -> Result<bool, ()> {
            Ok(true)
        }
        fn set_analog_input(&mut self, _: AnalogChannel) -> Result<(), ()> {
            Ok(())
        }
        fn read_analog(&mut self, _: AnalogChannel) -> Result<u16, ()> {
            Ok(512)
        }
    }

    let mut card = MemoryCard::new(card_image(&identity_payload(1, 3, 0)));
    let mut myriad = Myriad::default();
    myriad.detect(&mut PresencePin::seated(), &mut card, &mut NoDelay::default());

    let mut rows = [0u16; 6];
    assert!(myriad.matrix_hook(&mut AllPressed, &mut rows, 0));
    assert_eq!(rows[5], 0b1111);
}
