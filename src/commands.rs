use crate::channels::Channel;

pub trait Command {
    type Response;
    fn code(&self) -> u8;
}

/// Command carried by a single "write byte data" transfer.
pub trait WriteCommand: Command<Response = ()> {
    fn value(&self) -> i16;
}

/// Command answered by a "read word data" transfer, already split into `[high, low]`.
pub trait ReadCommand: Command {
    fn decode(word: [u8; 2]) -> Self::Response;
}

macro_rules! plain_code {
    ($code:literal) => {
        fn code(&self) -> u8 {
            $code
        }
    };
}

pub struct GetRevision;
impl Command for GetRevision {
    type Response = Revision;
    plain_code!(0);
}
impl ReadCommand for GetRevision {
    fn decode([board, firmware]: [u8; 2]) -> Revision {
        Revision { board, firmware }
    }
}

/// Board type and firmware revision reported by the Picon Zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Revision {
    pub board: u8,
    pub firmware: u8,
}

pub struct Reset;
impl Command for Reset {
    type Response = ();
    plain_code!(20);
}
impl WriteCommand for Reset {
    fn value(&self) -> i16 {
        0
    }
}

pub struct SetMotor {
    pub channel: Channel,
    pub speed: i8,
}
impl Command for SetMotor {
    type Response = ();
    fn code(&self) -> u8 {
        self.channel.index()
    }
}
impl WriteCommand for SetMotor {
    fn value(&self) -> i16 {
        self.speed.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn motor_register_follows_channel() {
        let a = SetMotor {
            channel: Channel::A,
            speed: -127,
        };
        let b = SetMotor {
            channel: Channel::B,
            speed: 64,
        };
        assert_eq!((a.code(), a.value()), (0, -127));
        assert_eq!((b.code(), b.value()), (1, 64));
    }

    #[test]
    fn revision_splits_word() {
        assert_eq!(
            GetRevision::decode([2, 7]),
            Revision {
                board: 2,
                firmware: 7
            }
        );
        assert_eq!(GetRevision.code(), 0);
        assert_eq!((Reset.code(), Reset.value()), (20, 0));
    }
}
