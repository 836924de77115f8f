//! Exclusive actuation channels.

use std::fmt;

/// An exclusive resource an agent exposes to its behaviors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ControlChannel {
    Movement,
    Orientation,
    TargetSelection,
}

impl ControlChannel {
    pub const COUNT: usize = 3;

    pub const ALL: [ControlChannel; Self::COUNT] = [
        ControlChannel::Movement,
        ControlChannel::Orientation,
        ControlChannel::TargetSelection,
    ];

    #[inline]
    pub(crate) fn slot(self) -> usize {
        self as usize
    }

    #[inline]
    fn bit(self) -> u8 {
        1 << self.slot()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ControlChannel::Movement        => "movement",
            ControlChannel::Orientation     => "orientation",
            ControlChannel::TargetSelection => "target",
        }
    }
}

impl fmt::Display for ControlChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A small set of channels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ChannelSet(u8);

impl ChannelSet {
    pub const EMPTY: ChannelSet = ChannelSet(0);

    pub fn of(channels: &[ControlChannel]) -> Self {
        channels.iter().fold(Self::EMPTY, |set, &c| set.with(c))
    }

    #[must_use]
    pub fn with(self, channel: ControlChannel) -> Self {
        ChannelSet(self.0 | channel.bit())
    }

    #[must_use]
    pub fn without(self, channel: ControlChannel) -> Self {
        ChannelSet(self.0 & !channel.bit())
    }

    pub fn contains(self, channel: ControlChannel) -> bool {
        self.0 & channel.bit() != 0
    }

    pub fn intersects(self, other: ChannelSet) -> bool {
        self.0 & other.0 != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = ControlChannel> {
        ControlChannel::ALL.into_iter().filter(move |&c| self.contains(c))
    }
}

impl From<ControlChannel> for ChannelSet {
    fn from(channel: ControlChannel) -> Self {
        ChannelSet::EMPTY.with(channel)
    }
}
