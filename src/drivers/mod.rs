// Hardware drivers: esp-hal implementations of the card-facing traits.
//
// Pin assignments and bus wiring live in board/; these only adapt the
// HAL types to what the myriad crate consumes.

pub mod card_port;
