mod common;

use common::{transport_parts, MockDelay, Op, RecordingTransport, Trace};
use embassy_futures::block_on;
use tumbler_core::config::LinkTiming;
use tumbler_core::{CommandSequencer, SequenceStep, WakeSerialTransport};
use tumbler_protocol::{Code, Mode};

fn code() -> Code {
    Code::from_clamped([1, 2, 3, 4, 5])
}

fn sequencer(trace: &Trace) -> CommandSequencer<RecordingTransport, MockDelay> {
    CommandSequencer::new(
        RecordingTransport::new(trace.clone()),
        MockDelay {
            trace: trace.clone(),
        },
    )
}

#[test]
fn test_primary_overwrite_then_unlock() {
    let trace = Trace::new();
    let mut seq = sequencer(&trace);

    block_on(seq.send(Mode::Primary, &code())).unwrap();

    let frames = seq.transport_mut().frames();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].1, vec![0x00, 0x75, 1, 2, 3, 4, 5, 0x84]);
    assert_eq!(frames[1].1, vec![0x00, 0x71, 1, 2, 3, 4, 5, 0x80]);
    assert!(frames[1].0 - frames[0].0 >= 500_000_000);
}

#[test]
fn test_secondary_uses_secondary_overwrite() {
    let trace = Trace::new();
    let mut seq = sequencer(&trace);

    block_on(seq.send(Mode::Secondary, &code())).unwrap();

    let frames = seq.transport_mut().frames();
    assert_eq!(frames[0].1[1], 0x76);
    assert_eq!(frames[0].1[7], 0x85);
    assert_eq!(frames[1].1[1], 0x71);
}

#[test]
fn test_overwrite_failure_aborts_unlock() {
    let trace = Trace::new();
    let mut seq = sequencer(&trace);
    seq.transport_mut().fail_on = Some(0);

    let err = block_on(seq.send(Mode::Primary, &code())).unwrap_err();

    assert_eq!(err.step, SequenceStep::Overwrite);
    assert_eq!(seq.transport_mut().calls, 1);
    assert!(seq.transport_mut().frames().is_empty());
    assert!(!trace.ops().iter().any(|op| matches!(op, Op::Delay(_))));
}

#[test]
fn test_unlock_failure_reported() {
    let trace = Trace::new();
    let mut seq = sequencer(&trace);
    seq.transport_mut().fail_on = Some(1);

    let err = block_on(seq.send(Mode::Primary, &code())).unwrap_err();

    assert_eq!(err.step, SequenceStep::Unlock);
    assert_eq!(seq.transport_mut().frames().len(), 1);
}

#[test]
fn test_custom_inter_command_delay() {
    let trace = Trace::new();
    let timing = LinkTiming {
        inter_command_ms: 750,
        ..LinkTiming::PROTOCOL
    };
    let mut seq = CommandSequencer::with_timing(
        RecordingTransport::new(trace.clone()),
        MockDelay {
            trace: trace.clone(),
        },
        &timing,
    );

    block_on(seq.send(Mode::Primary, &code())).unwrap();

    let frames = seq.transport_mut().frames();
    assert_eq!(frames[1].0 - frames[0].0, 750_000_000);
    assert_eq!(seq.inter_command_ms(), 750);
}

#[test]
fn test_full_stack_wire_trace() {
    let trace = Trace::new();
    let (line, delay) = transport_parts(&trace);
    let transport = WakeSerialTransport::new(line, delay);
    let mut seq = CommandSequencer::new(
        transport,
        MockDelay {
            trace: trace.clone(),
        },
    );

    block_on(seq.send(Mode::Primary, &code())).unwrap();

    let writes: Vec<Vec<u8>> = trace
        .ops()
        .into_iter()
        .filter_map(|op| match op {
            Op::Write(bytes) => Some(bytes),
            _ => None,
        })
        .collect();
    assert_eq!(writes.len(), 2);
    assert_eq!(writes[0][1], 0x75);
    assert_eq!(writes[1][1], 0x71);

    let stamped = trace.stamped();
    let closes: Vec<u64> = stamped
        .iter()
        .filter(|(_, op)| *op == Op::Close)
        .map(|(at, _)| *at)
        .collect();
    let lows: Vec<u64> = stamped
        .iter()
        .filter(|(_, op)| *op == Op::Level(tumbler_hal::Level::Low))
        .map(|(at, _)| *at)
        .collect();
    assert_eq!(closes.len(), 2);
    assert_eq!(lows.len(), 2);
    assert!(lows[1] - closes[0] >= 500_000_000);
}
