mod tests {
    use myrtio_keypad::config::{BrightnessLevels, PadConfig, PadMode, hue};
    use myrtio_keypad::keycode::Keycode;
    use myrtio_keypad::state_machine::{Edge, EdgeEvent, KeyAction, KeyActionKind, PadStateMachine};

    const LEVELS: BrightnessLevels = BrightnessLevels::DEFAULT;

    const TOGGLE_ON: &[Keycode] = &[Keycode::ALT, Keycode::F13];
    const TOGGLE_OFF: &[Keycode] = &[Keycode::CONTROL, Keycode::F13];

    /// Toggle, three scene pads, a key, a dead pad and a second group
    const PADS: [PadConfig; 7] = [
        PadConfig::toggle(hue::RED, TOGGLE_ON, TOGGLE_OFF),
        PadConfig::grouped(hue::MR, "scene", &[Keycode::F13]),
        PadConfig::grouped(hue::MR, "scene", &[Keycode::F14]),
        PadConfig::grouped(hue::MR, "scene", &[Keycode::F15]),
        PadConfig::key(hue::CYAN, &[Keycode::SHIFT, Keycode::F13]),
        PadConfig::UNUSED,
        PadConfig::grouped(hue::BLUE, "audio", &[Keycode::F20]),
    ];

    fn machine() -> PadStateMachine<7> {
        PadStateMachine::new(&PADS, &LEVELS)
    }

    fn codes(action: &Option<KeyAction>) -> (KeyActionKind, &[Keycode]) {
        let action = action.as_ref().expect("expected a key action");
        (action.kind, action.codes.as_slice())
    }

    #[test]
    fn test_initial_state() {
        let pads = machine();
        assert_eq!(pads.len(), 7);
        for i in 0..pads.len() {
            let state = pads.state(i);
            assert!(!state.down);
            assert!(!state.on);
        }
        assert_eq!(pads.state(0).brightness, LEVELS.max);
        assert_eq!(pads.state(5).brightness, LEVELS.min);
        assert_eq!(pads.profile(5).mode, PadMode::None);
    }

    #[test]
    fn test_key_press_and_release() {
        let mut pads = machine();
        let press = pads.on_edge(4, Edge::Rising);
        assert_eq!(codes(&press), (KeyActionKind::Press, &[Keycode::SHIFT, Keycode::F13][..]));
        assert!(pads.state(4).down);
        assert!(!pads.state(4).on);

        let release = pads.on_edge(4, Edge::Falling);
        assert_eq!(codes(&release), (KeyActionKind::Release, &[Keycode::SHIFT, Keycode::F13][..]));
        assert!(!pads.state(4).down);
    }

    #[test]
    fn test_toggle_sequence() {
        let mut pads = machine();

        let action = pads.on_edge(0, Edge::Rising);
        assert_eq!(codes(&action), (KeyActionKind::Press, TOGGLE_ON));
        assert!(pads.state(0).on);

        let action = pads.on_edge(0, Edge::Falling);
        assert_eq!(codes(&action), (KeyActionKind::Release, TOGGLE_ON));
        assert!(pads.state(0).on);

        let action = pads.on_edge(0, Edge::Rising);
        assert_eq!(codes(&action), (KeyActionKind::Press, TOGGLE_OFF));
        assert!(!pads.state(0).on);

        let action = pads.on_edge(0, Edge::Falling);
        assert_eq!(codes(&action), (KeyActionKind::Release, TOGGLE_OFF));
        assert!(!pads.state(0).on);
    }

    #[test]
    fn test_toggle_emits_in_lockstep_with_state() {
        let mut pads = machine();
        for _ in 0..10 {
            let press = pads.on_edge(0, Edge::Rising);
            let expected = if pads.state(0).on { TOGGLE_ON } else { TOGGLE_OFF };
            assert_eq!(codes(&press), (KeyActionKind::Press, expected));
            let release = pads.on_edge(0, Edge::Falling);
            assert_eq!(codes(&release), (KeyActionKind::Release, expected));
        }
    }

    #[test]
    fn test_group_press_clears_other_members() {
        let mut pads = machine();
        pads.on_edge(2, Edge::Rising);
        pads.on_edge(2, Edge::Falling);
        assert!(pads.state(2).on);

        let action = pads.on_edge(1, Edge::Rising);
        assert_eq!(codes(&action), (KeyActionKind::Press, &[Keycode::F13][..]));
        assert!(pads.state(1).on);
        assert!(!pads.state(2).on);
        assert_eq!(pads.state(2).brightness, LEVELS.min);
        assert!(!pads.state(3).on);
    }

    #[test]
    fn test_group_exclusion_is_a_hard_cut() {
        let mut pads = machine();
        pads.handle(EdgeEvent::press(3));
        pads.handle(EdgeEvent::release(3));
        let before = pads.state(3).brightness;
        assert!(before > LEVELS.min);

        pads.handle(EdgeEvent::press(2));
        assert_eq!(pads.state(3).brightness, LEVELS.min);
        // The pressed pad keeps its brightness, only cleared members are cut
        assert_eq!(pads.state(2).brightness, LEVELS.max);
    }

    #[test]
    fn test_at_most_one_group_member_on() {
        let mut pads = machine();
        let sequence = [1, 3, 2, 2, 1, 3, 3, 2];
        for pad in sequence {
            pads.on_edge(pad, Edge::Rising);
            let on = (1..=3).filter(|i| pads.state(*i).on).count();
            assert_eq!(on, 1);
            assert!(pads.state(pad).on);
            pads.on_edge(pad, Edge::Falling);
        }
    }

    #[test]
    fn test_repress_of_active_member_re_emits() {
        let mut pads = machine();
        pads.on_edge(1, Edge::Rising);
        pads.on_edge(1, Edge::Falling);
        let action = pads.on_edge(1, Edge::Rising);
        assert_eq!(codes(&action), (KeyActionKind::Press, &[Keycode::F13][..]));
        assert!(pads.state(1).on);
        let release = pads.on_edge(1, Edge::Falling);
        assert_eq!(codes(&release), (KeyActionKind::Release, &[Keycode::F13][..]));
    }

    #[test]
    fn test_groups_are_independent() {
        let mut pads = machine();
        pads.on_edge(1, Edge::Rising);
        pads.on_edge(6, Edge::Rising);
        assert!(pads.state(1).on);
        assert!(pads.state(6).on);
    }

    #[test]
    fn test_active_in_group_by_name() {
        let mut pads = machine();
        assert_eq!(pads.active_in_group("scene"), None);

        pads.on_edge(2, Edge::Rising);
        pads.on_edge(6, Edge::Rising);
        assert_eq!(pads.active_in_group("scene"), Some(2));
        assert_eq!(pads.active_in_group("audio"), Some(6));

        pads.on_edge(3, Edge::Rising);
        assert_eq!(pads.active_in_group("scene"), Some(3));
        assert_eq!(pads.active_in_group("lights"), None);
    }

    #[test]
    fn test_group_press_leaves_other_modes_alone() {
        let mut pads = machine();
        pads.on_edge(0, Edge::Rising);
        pads.on_edge(0, Edge::Falling);
        pads.on_edge(1, Edge::Rising);
        assert!(pads.state(0).on);
    }

    #[test]
    fn test_dead_pad_never_emits() {
        let mut pads = machine();
        for edge in [Edge::Rising, Edge::Falling, Edge::Rising, Edge::Rising, Edge::Falling] {
            assert_eq!(pads.on_edge(5, edge), None);
            assert!(!pads.state(5).on);
            assert_eq!(pads.state(5).brightness, LEVELS.min);
        }
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_pad_panics() {
        let mut pads = machine();
        pads.on_edge(7, Edge::Rising);
    }
}
