use chip8vm_core::constants::SPRITE_SHEET;
use chip8vm_core::{Error, Instruction, Machine, TIMER_HZ};

fn machine_with(program: &[u16]) -> Machine {
    let rom: Vec<u8> = program.iter().flat_map(|word| word.to_be_bytes()).collect();
    let mut machine = Machine::new();
    machine.load(&rom).expect("program should fit");
    machine
}

fn run(machine: &mut Machine, steps: usize) {
    for _ in 0..steps {
        machine.step().expect("step should succeed");
    }
}

#[test]
fn test_draws_zero_glyph_at_origin() {
    // LD I, 0x000; LD V0, 0; DRW V0, V0, 5
    let mut machine = machine_with(&[0xA000, 0x6000, 0xD005]);
    run(&mut machine, 2);
    let step = machine.step().unwrap();
    assert_eq!(step.instruction, Instruction::Drw { x: 0, y: 0, n: 5 });
    assert!(step.redraw);

    let frame = machine.frame_buffer();
    for (y, row) in frame.iter().enumerate() {
        for (x, &pixel) in row.iter().enumerate() {
            let expected = if y < 5 && x < 8 {
                (SPRITE_SHEET[y] >> (7 - x)) & 1
            } else {
                0
            };
            assert_eq!(pixel, expected, "pixel ({}, {})", x, y);
        }
    }
    assert_eq!(machine.registers()[0xF], 0);
}

#[test]
fn test_scripted_loads_and_adds() {
    // LD V0, 0x10; LD V1, 0x20; ADD V0, V1; LD V2, 0xF0; ADD V2, V1
    let mut machine = machine_with(&[0x6010, 0x6120, 0x8014, 0x62F0, 0x8214]);
    run(&mut machine, 3);
    assert_eq!(machine.registers()[0x0], 0x30);
    assert_eq!(machine.registers()[0x1], 0x20);
    assert_eq!(machine.registers()[0xF], 0x00);
    run(&mut machine, 2);
    assert_eq!(machine.registers()[0x2], 0x10);
    assert_eq!(machine.registers()[0xF], 0x01);
    for register in 0x3..0xF {
        assert_eq!(machine.registers()[register], 0, "V{:X}", register);
    }
}

#[test]
fn test_call_then_ret_resumes_after_call() {
    // 0x200: CALL 0x206; 0x202: LD V0, 1; 0x204: JP 0x204; 0x206: RET
    let mut machine = machine_with(&[0x2206, 0x6001, 0x1204, 0x00EE]);
    run(&mut machine, 1);
    assert_eq!(machine.pc(), 0x206);
    assert_eq!(machine.stack(), &[0x202]);
    run(&mut machine, 1);
    assert_eq!(machine.pc(), 0x202);
    assert!(machine.stack().is_empty());
    run(&mut machine, 1);
    assert_eq!(machine.registers()[0], 1);
}

#[test]
fn test_sixteen_nested_calls_then_overflow() {
    // every instruction calls the next one
    let program: Vec<u16> = (0..17).map(|n| 0x2000 | (0x202 + 2 * n)).collect();
    let mut machine = machine_with(&program);
    run(&mut machine, 16);
    assert_eq!(machine.stack().len(), 16);
    assert_eq!(machine.stack()[15], 0x220);

    match machine.step() {
        Err(Error::StackOverflow { address }) => assert_eq!(address, 0x220),
        other => panic!("expected stack overflow, got {:?}", other),
    }
    assert_eq!(machine.stack().len(), 16);
}

#[test]
fn test_ret_with_empty_stack_underflows() {
    let mut machine = machine_with(&[0x00EE]);
    assert!(matches!(
        machine.step(),
        Err(Error::StackUnderflow { address: 0x200 })
    ));
    // the pre-step state can be recovered
    assert!(machine.rewind());
    assert_eq!(machine.pc(), 0x200);
}

#[test]
fn test_register_range_round_trip() {
    // LD V0..V3; LD I, 0x300; LD [I], V3; LD V0..V3, 0; LD V3, [I]
    let mut machine = machine_with(&[
        0x600A, 0x610B, 0x620C, 0x630D, 0xA300, 0xF355, 0x6000, 0x6100, 0x6200, 0x6300, 0xF365,
    ]);
    run(&mut machine, 6);
    assert_eq!(machine.state().memory[0x300..0x305], [0x0A, 0x0B, 0x0C, 0x0D, 0x00]);
    run(&mut machine, 4);
    assert_eq!(machine.registers()[0..4], [0, 0, 0, 0]);
    run(&mut machine, 1);
    assert_eq!(machine.registers()[0..5], [0x0A, 0x0B, 0x0C, 0x0D, 0x00]);
}

#[test]
fn test_bcd_of_glyph_digits() {
    // LD V5, 254; LD I, 0x400; LD B, V5
    let mut machine = machine_with(&[0x65FE, 0xA400, 0xF533]);
    run(&mut machine, 3);
    assert_eq!(machine.state().memory[0x400..0x403], [2, 5, 4]);
}

#[test]
fn test_delay_timer_runs_out_within_a_second() {
    // LD V0, 5; LD DT, V0
    let mut machine = machine_with(&[0x6005, 0xF015]);
    run(&mut machine, 2);
    assert_eq!(machine.delay_timer(), 5);
    for _ in 0..TIMER_HZ {
        machine.tick_timers();
    }
    assert_eq!(machine.delay_timer(), 0);
}

#[test]
fn test_timers_are_independent_of_stepping() {
    // LD V0, 3; LD ST, V0; JP 0x204
    let mut machine = machine_with(&[0x6003, 0xF018, 0x1204]);
    run(&mut machine, 50);
    assert_eq!(machine.sound_timer(), 3);
    machine.tick_timers();
    assert_eq!(machine.sound_timer(), 2);
    assert!(machine.is_beeping());
}

#[test]
fn test_skip_on_key_follows_set_key() {
    // LD V0, 0xA; SKP V0; LD V1, 1; LD V2, 2
    let mut machine = machine_with(&[0x600A, 0xE09E, 0x6101, 0x6202]);
    machine.set_key(0xA, true);
    run(&mut machine, 3);
    assert_eq!(machine.registers()[1], 0);
    assert_eq!(machine.registers()[2], 2);
}

#[test]
fn test_step_display_is_disassembly() {
    let mut machine = machine_with(&[0x6A2F]);
    let step = machine.step().unwrap();
    assert_eq!(step.to_string(), "0x0200  LD VA, 0x2F");
}
