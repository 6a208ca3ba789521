//! Pen state and the two input surfaces that edit it.
//!
//! `Pen` is the single source of truth for color and thickness. The thickness
//! slider and the thickness text field are views of one value
//! ([`ThicknessControl`]): they are re-synchronised from the pen after every
//! change, and never hold an authoritative value of their own. The color
//! dialog ([`ColorDialog`]) edits a private copy seeded from the pen and only
//! hands a color back on accept.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::types::Rgb;

/// Stroke width in pixels, always within `1..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Thickness(u8);

impl Thickness {
    pub const MIN: Thickness = Thickness(1);
    pub const MAX: Thickness = Thickness(100);
    pub const DEFAULT: Thickness = Thickness(5);

    /// `None` if `value` is out of range.
    pub fn new(value: i64) -> Option<Self> {
        if (Self::MIN.0 as i64..=Self::MAX.0 as i64).contains(&value) {
            Some(Thickness(value as u8))
        } else {
            None
        }
    }

    /// Pin any integer into range (slider semantics).
    pub fn clamped(value: i64) -> Self {
        Thickness(value.clamp(Self::MIN.0 as i64, Self::MAX.0 as i64) as u8)
    }

    pub fn get(self) -> u32 {
        self.0 as u32
    }
}

impl Default for Thickness {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Thickness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Thickness {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| Error::InvalidInput(format!("thickness {s:?} is not an integer")))?;
        Thickness::new(value).ok_or_else(|| {
            Error::InvalidInput(format!(
                "thickness {value} is outside {}..={}",
                Thickness::MIN,
                Thickness::MAX
            ))
        })
    }
}

/// Current color and stroke width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pen {
    pub color: Rgb,
    pub thickness: Thickness,
}

impl Default for Pen {
    fn default() -> Self {
        Self { color: Rgb::BLACK, thickness: Thickness::DEFAULT }
    }
}

/// Slider position plus the text shown in the numeric field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThicknessControl {
    slider: u32,
    text: String,
}

impl ThicknessControl {
    pub fn new(thickness: Thickness) -> Self {
        Self { slider: thickness.get(), text: thickness.to_string() }
    }

    /// Re-render both surfaces from the pen's value.
    pub fn notify(&mut self, thickness: Thickness) {
        self.slider = thickness.get();
        self.text = thickness.to_string();
    }

    pub fn slider(&self) -> u32 {
        self.slider
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Typing in the field. Nothing is committed until submit.
    pub fn edit_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn push_char(&mut self, ch: char) {
        self.text.push(ch);
    }

    pub fn pop_char(&mut self) {
        self.text.pop();
    }
}

/// Which channel of the color dialog is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

/// Modal RGB picker. Seeded from the current pen color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorDialog {
    channels: [u8; 3],
}

/// How the color dialog was dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
    Accepted(Rgb),
    Cancelled,
}

impl ColorDialog {
    pub fn seeded(current: Rgb) -> Self {
        Self { channels: current.into() }
    }

    pub fn set(&mut self, channel: Channel, value: u8) {
        self.channels[channel as usize] = value;
    }

    pub fn get(&self, channel: Channel) -> u8 {
        self.channels[channel as usize]
    }

    /// The color currently dialled in.
    pub fn preview(&self) -> Rgb {
        Rgb::from(self.channels)
    }

    pub fn accept(self) -> DialogOutcome {
        DialogOutcome::Accepted(self.preview())
    }

    pub fn cancel(self) -> DialogOutcome {
        DialogOutcome::Cancelled
    }
}

/// Keyboard editing of an open [`ColorDialog`]: pick a channel, type its
/// value in decimal. Values above 255 are pinned to 255.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorEntry {
    dialog: ColorDialog,
    channel: Channel,
    typed: String,
}

impl ColorEntry {
    pub fn new(dialog: ColorDialog) -> Self {
        Self { dialog, channel: Channel::Red, typed: String::new() }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn dialog(&self) -> &ColorDialog {
        &self.dialog
    }

    /// Switch channels; the next digit starts a fresh value.
    pub fn select(&mut self, channel: Channel) {
        self.channel = channel;
        self.typed.clear();
    }

    pub fn push_digit(&mut self, digit: u8) {
        if self.typed.len() >= 3 {
            self.typed.clear();
        }
        self.typed.push(char::from(b'0' + digit.min(9)));
        self.apply_typed();
    }

    pub fn pop_digit(&mut self) {
        self.typed.pop();
        self.apply_typed();
    }

    pub fn accept(self) -> DialogOutcome {
        self.dialog.accept()
    }

    pub fn cancel(self) -> DialogOutcome {
        self.dialog.cancel()
    }

    fn apply_typed(&mut self) {
        let value = self.typed.parse::<u32>().unwrap_or(0).min(255) as u8;
        self.dialog.set(self.channel, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thickness_bounds() {
        assert_eq!(Thickness::new(0), None);
        assert_eq!(Thickness::new(101), None);
        assert_eq!(Thickness::new(1), Some(Thickness::MIN));
        assert_eq!(Thickness::new(100), Some(Thickness::MAX));
        assert_eq!(Thickness::clamped(-7), Thickness::MIN);
        assert_eq!(Thickness::clamped(250), Thickness::MAX);
        assert_eq!(Thickness::clamped(42).get(), 42);
    }

    #[test]
    fn thickness_parses_only_in_range_integers() {
        assert_eq!("50".parse::<Thickness>().unwrap().get(), 50);
        assert_eq!(" 7 ".parse::<Thickness>().unwrap().get(), 7);
        for bad in ["0", "101", "abc", "", "5.5", "-3"] {
            assert!(
                matches!(bad.parse::<Thickness>(), Err(Error::InvalidInput(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn control_follows_notifications() {
        let mut control = ThicknessControl::new(Thickness::DEFAULT);
        assert_eq!((control.slider(), control.text()), (5, "5"));

        control.edit_text("9");
        control.push_char('1');
        assert_eq!(control.text(), "91");
        assert_eq!(control.slider(), 5);

        control.notify(Thickness::clamped(12));
        assert_eq!((control.slider(), control.text()), (12, "12"));
    }

    #[test]
    fn dialog_is_seeded_and_only_accept_returns_a_color() {
        let mut dialog = ColorDialog::seeded(Rgb::new(1, 2, 3));
        assert_eq!(dialog.get(Channel::Green), 2);

        dialog.set(Channel::Red, 255);
        dialog.set(Channel::Green, 0);
        dialog.set(Channel::Blue, 0);
        assert_eq!(dialog.clone().cancel(), DialogOutcome::Cancelled);
        assert_eq!(dialog.accept(), DialogOutcome::Accepted(Rgb::new(255, 0, 0)));
    }

    #[test]
    fn color_entry_types_channels() {
        let mut entry = ColorEntry::new(ColorDialog::seeded(Rgb::new(9, 9, 9)));
        assert_eq!(entry.channel(), Channel::Red);
        for d in [2, 5, 5] {
            entry.push_digit(d);
        }
        entry.select(Channel::Green);
        entry.push_digit(0);
        entry.select(Channel::Blue);
        entry.push_digit(9);
        entry.push_digit(9);
        entry.push_digit(9);
        assert_eq!(entry.dialog().preview(), Rgb::new(255, 0, 255));

        // A fourth digit starts over; backspace to nothing means zero.
        entry.push_digit(4);
        assert_eq!(entry.dialog().get(Channel::Blue), 4);
        entry.pop_digit();
        assert_eq!(entry.dialog().get(Channel::Blue), 0);

        assert_eq!(entry.clone().cancel(), DialogOutcome::Cancelled);
        assert_eq!(entry.accept(), DialogOutcome::Accepted(Rgb::new(255, 0, 0)));
    }
}
