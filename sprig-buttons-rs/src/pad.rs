//! The Sprig's eight-key pad.
//!
//! [`ButtonPad`] owns one [`Button`] per key and polls all of them in a
//! single call, so the driving loop gets one [`PadEvents`] set per
//! iteration.

use embedded_hal::digital::InputPin;
use telemetry::Clock;

use crate::button::{Button, DebounceMode};
use crate::constants::PAD_KEY_COUNT;

/// Physical key on the Sprig: left cluster W A S D, right cluster I J K L.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PadKey {
    W,
    A,
    S,
    D,
    I,
    J,
    K,
    L,
}

impl PadKey {
    /// All keys in pin-array order.
    pub const ALL: [PadKey; PAD_KEY_COUNT] = [
        PadKey::W,
        PadKey::A,
        PadKey::S,
        PadKey::D,
        PadKey::I,
        PadKey::J,
        PadKey::K,
        PadKey::L,
    ];

    /// Position of this key in the pin array passed to [`ButtonPad::new()`].
    pub const fn index(self) -> usize {
        self as usize
    }

    const fn bit(self) -> u8 {
        1 << self.index()
    }
}

/// Set of keys that reported a press during one poll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PadEvents(u8);

impl PadEvents {
    /// No keys.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Add a key to the set.
    pub fn insert(&mut self, key: PadKey) {
        self.0 |= key.bit();
    }

    /// Whether `key` is in the set.
    pub const fn contains(self, key: PadKey) -> bool {
        self.0 & key.bit() != 0
    }

    /// `true` if no key was pressed.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of keys in the set.
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Keys in the set, in [`PadKey::ALL`] order.
    pub fn iter(self) -> impl Iterator<Item = PadKey> {
        PadKey::ALL.into_iter().filter(move |key| self.contains(*key))
    }
}

/// Eight debounced buttons sharing one clock.
///
/// # Example
///
/// ```no_run
/// use button_driver::{ButtonPad, PadKey};
/// use telemetry::SystemClock;
///
/// # fn example<P: embedded_hal::digital::InputPin>(pins: [P; 8]) {
/// let mut pad = ButtonPad::new(pins, SystemClock);
/// let events = pad.poll();
/// if events.contains(PadKey::L) {
///     // toggle the backlight
/// }
/// # }
/// ```
pub struct ButtonPad<P, C> {
    buttons: [Button<P, C>; PAD_KEY_COUNT],
}

impl<P, C> ButtonPad<P, C>
where
    P: InputPin,
    C: Clock + Clone,
{
    /// Bind eight pull-up input lines, in [`PadKey::ALL`] order.
    pub fn new(pins: [P; PAD_KEY_COUNT], clock: C) -> Self {
        Self {
            buttons: pins.map(|pin| Button::new(pin, clock.clone())),
        }
    }

    /// Query every key once and collect the presses.
    ///
    /// Every button's state machine advances on every poll, so call this
    /// once per loop iteration.
    pub fn poll(&mut self) -> PadEvents {
        let mut events = PadEvents::empty();
        for (key, button) in PadKey::ALL.into_iter().zip(self.buttons.iter_mut()) {
            if button.is_pressed() {
                events.insert(key);
            }
        }
        events
    }

    /// Set the debounce mode of one key.
    pub fn set_debounce_mode(&mut self, key: PadKey, mode: DebounceMode) {
        self.buttons[key.index()].set_debounce_mode(mode);
    }

    /// Direct access to one key's button.
    pub fn button_mut(&mut self, key: PadKey) -> &mut Button<P, C> {
        &mut self.buttons[key.index()]
    }
}
