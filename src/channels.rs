use crate::Error;

/// One of the two motor outputs on the board. By convention channel A drives the left side
/// of a robot and channel B the right side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    A,
    B,
}

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::A, Channel::B];

    /// Index of this channel, which is also the register its speed is written to.
    pub fn index(&self) -> u8 {
        match self {
            Channel::A => 0,
            Channel::B => 1,
        }
    }
}

impl TryFrom<u8> for Channel {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Channel::A),
            1 => Ok(Channel::B),
            other => Err(Error::InvalidChannel(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_from_index() -> anyhow::Result<()> {
        assert_eq!(Channel::try_from(0)?, Channel::A);
        assert_eq!(Channel::try_from(1)?, Channel::B);
        for channel in Channel::ALL {
            assert_eq!(Channel::try_from(channel.index())?, channel);
        }
        Ok(())
    }

    #[test]
    fn rejects_unknown_channel() {
        assert!(matches!(
            Channel::try_from(2),
            Err(Error::InvalidChannel(2))
        ));
    }
}
