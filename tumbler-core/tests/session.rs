mod common;

use common::{MockDelay, RecordingTransport, SerialFault, Trace};
use embassy_futures::block_on;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use tumbler_core::{
    Action, CommandSequencer, SendStatus, SharedSession, Snapshot, Transmit,
};
use tumbler_protocol::{Frame, InputEvent, Key, Mode};

/// Transport that pokes the session while "on the wire"
struct ProbingTransport<'a> {
    session: &'a SharedSession<NoopRawMutex>,
    seen: Vec<Snapshot>,
    frames: Vec<Frame>,
    fail: bool,
}

impl Transmit for ProbingTransport<'_> {
    type Error = SerialFault;

    async fn transmit(&mut self, frame: &Frame) -> Result<(), Self::Error> {
        for key in [Key::Up, Key::Right, Key::Cancel] {
            assert_eq!(self.session.handle_input(InputEvent::press(key)), None);
        }
        assert_eq!(self.session.handle_input(InputEvent::short(Key::Confirm)), None);
        assert_eq!(self.session.handle_input(InputEvent::long(Key::Confirm)), None);

        self.seen.push(self.session.snapshot());
        if self.fail {
            return Err(SerialFault);
        }
        self.frames.push(*frame);
        Ok(())
    }
}

fn probing(session: &SharedSession<NoopRawMutex>, fail: bool) -> ProbingTransport<'_> {
    ProbingTransport {
        session,
        seen: Vec::new(),
        frames: Vec::new(),
        fail,
    }
}

#[test]
fn test_sending_visible_and_input_rejected_mid_send() {
    let session = SharedSession::<NoopRawMutex>::new(4);
    session.handle_input(InputEvent::press(Key::Up));

    let Some(Action::Send(request)) = session.handle_input(InputEvent::short(Key::Confirm))
    else {
        panic!("confirm should start a send");
    };
    assert_eq!(request.code.to_bytes(), [2, 2, 3, 4, 5]);

    let trace = Trace::new();
    let mut seq = CommandSequencer::new(probing(&session, false), MockDelay { trace });

    block_on(session.run_send(request, &mut seq)).unwrap();

    let observer = seq.transport_mut();
    assert_eq!(observer.seen.len(), 2);
    for snap in &observer.seen {
        assert_eq!(snap.status, SendStatus::Sending);
        assert_eq!(snap.code.to_bytes(), [2, 2, 3, 4, 5]);
        assert_eq!(snap.selector.position(), 0);
        assert!(!snap.help_visible);
    }
    assert_eq!(observer.frames[0].code(), request.code);
    assert_eq!(session.snapshot().status, SendStatus::Done);
}

#[test]
fn test_failed_send_reports_failed() {
    let session = SharedSession::<NoopRawMutex>::new(4);
    let Some(Action::Send(request)) = session.handle_input(InputEvent::short(Key::Confirm))
    else {
        panic!("confirm should start a send");
    };

    let trace = Trace::new();
    let mut seq = CommandSequencer::new(probing(&session, true), MockDelay { trace });

    assert!(block_on(session.run_send(request, &mut seq)).is_err());
    assert_eq!(seq.transport_mut().seen.len(), 1);
    assert_eq!(session.snapshot().status, SendStatus::Failed);

    // acknowledged, back to editing
    session.handle_input(InputEvent::short(Key::Confirm));
    assert_eq!(session.snapshot().status, SendStatus::Idle);
}

#[test]
fn test_secondary_request_carries_mode() {
    let session = SharedSession::<NoopRawMutex>::new(0);
    for _ in 0..5 {
        session.handle_input(InputEvent::press(Key::Right));
    }
    session.handle_input(InputEvent::press(Key::Down));

    let trace = Trace::new();
    let mut seq = CommandSequencer::new(
        RecordingTransport::new(trace.clone()),
        MockDelay {
            trace: trace.clone(),
        },
    );
    let Some(Action::Send(request)) = session.handle_input(InputEvent::short(Key::Confirm))
    else {
        panic!("confirm should start a send");
    };
    assert_eq!(request.mode, Mode::Secondary);

    block_on(session.run_send(request, &mut seq)).unwrap();

    let frames = seq.transport_mut().frames();
    assert_eq!(frames[0].1[1], 0x76);
    assert_eq!(session.snapshot().status, SendStatus::Done);
}
