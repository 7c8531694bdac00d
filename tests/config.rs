mod tests {
    use myrtio_keypad::config::{
        GroupId, OBS_PADS, PadConfig, PadMode, PadProfile, SCENE_GROUP, derive_profiles, hue,
    };
    use myrtio_keypad::keycode::{KeyCombo, Keycode, MAX_COMBO};

    const ON: &[Keycode] = &[Keycode::ALT, Keycode::F13];
    const OFF: &[Keycode] = &[Keycode::CONTROL, Keycode::F13];

    fn pad(
        group: Option<&'static str>,
        keycodes_on: &'static [Keycode],
        keycodes_off: Option<&'static [Keycode]>,
    ) -> PadConfig {
        PadConfig {
            hue: Some(hue::RED),
            group,
            keycodes_on,
            keycodes_off,
        }
    }

    #[test]
    fn test_mode_precedence() {
        assert_eq!(PadMode::derive(&pad(None, ON, Some(OFF))), PadMode::Toggle);
        assert_eq!(PadMode::derive(&pad(Some("a"), ON, Some(OFF))), PadMode::Toggle);
        assert_eq!(PadMode::derive(&pad(Some("a"), ON, None)), PadMode::Group);
        assert_eq!(PadMode::derive(&pad(Some("a"), ON, Some(&[]))), PadMode::Group);
        assert_eq!(PadMode::derive(&pad(None, ON, None)), PadMode::Key);
        assert_eq!(PadMode::derive(&pad(None, ON, Some(&[]))), PadMode::Key);
    }

    #[test]
    fn test_mode_without_activation_codes_is_none() {
        assert_eq!(PadMode::derive(&pad(None, &[], None)), PadMode::None);
        assert_eq!(PadMode::derive(&pad(Some("a"), &[], None)), PadMode::None);
        assert_eq!(PadMode::derive(&pad(None, &[], Some(OFF))), PadMode::None);
        assert_eq!(PadMode::derive(&PadConfig::UNUSED), PadMode::None);
    }

    #[test]
    fn test_mode_derivation_is_deterministic() {
        let configs = [
            pad(None, ON, Some(OFF)),
            pad(Some("a"), ON, None),
            pad(None, ON, None),
            pad(Some("a"), &[], Some(OFF)),
        ];
        for config in &configs {
            assert_eq!(PadMode::derive(config), PadMode::derive(config));
            assert_eq!(PadProfile::derive(config, None), PadProfile::derive(config, None));
        }
    }

    #[test]
    fn test_toggle_leaves_its_group() {
        let profiles = derive_profiles(&[pad(Some("scene"), ON, Some(OFF)), pad(Some("scene"), ON, None)]);
        assert_eq!(profiles[0].mode, PadMode::Toggle);
        assert_eq!(profiles[0].group, None);
        assert_eq!(profiles[0].group_name, None);
        assert_eq!(profiles[1].mode, PadMode::Group);
        assert_eq!(profiles[1].group, Some(GroupId(0)));
        assert_eq!(profiles[1].group_name, Some("scene"));
    }

    #[test]
    fn test_group_ids_follow_first_appearance() {
        let profiles = derive_profiles(&[
            pad(Some("b"), ON, None),
            pad(Some("a"), ON, None),
            pad(None, ON, None),
            pad(Some("b"), ON, None),
            pad(Some("a"), &[], None),
        ]);
        assert_eq!(profiles[0].group, Some(GroupId(0)));
        assert_eq!(profiles[1].group, Some(GroupId(1)));
        assert_eq!(profiles[2].group, None);
        assert_eq!(profiles[3].group, Some(GroupId(0)));
        assert_eq!(profiles[4].mode, PadMode::None);
        assert_eq!(profiles[4].group, None);
    }

    #[test]
    fn test_long_combo_is_truncated() {
        const LONG: &[Keycode] = &[Keycode::CONTROL, Keycode::SHIFT, Keycode::ALT, Keycode::F13];
        let profile = PadProfile::derive(&pad(None, LONG, None), None);
        assert_eq!(profile.mode, PadMode::Key);
        assert_eq!(profile.keycodes_on.len(), MAX_COMBO);
        assert_eq!(profile.keycodes_on.as_slice(), &LONG[..MAX_COMBO]);
    }

    #[test]
    fn test_off_codes_kept_only_for_toggles() {
        let toggle = PadProfile::derive(&pad(None, ON, Some(OFF)), None);
        assert_eq!(toggle.keycodes_off.as_slice(), OFF);
        let key = PadProfile::derive(&pad(None, ON, Some(&[])), None);
        assert_eq!(key.keycodes_off, KeyCombo::new());
    }

    #[test]
    fn test_saturation_follows_hue() {
        let colored = PadProfile::derive(&pad(None, ON, None), None);
        assert_eq!(colored.saturation(), 1.0);
        let colorless = PadProfile::derive(&pad(None, ON, None).with_hue(None), None);
        assert_eq!(colorless.saturation(), 0.0);
    }

    #[test]
    fn test_obs_table_modes() {
        let profiles = derive_profiles(&OBS_PADS);
        assert_eq!(profiles[0].mode, PadMode::Toggle);
        for profile in &profiles[1..12] {
            assert_eq!(profile.mode, PadMode::Group);
            assert_eq!(profile.group, Some(GroupId(0)));
            assert_eq!(profile.group_name, Some(SCENE_GROUP));
        }
        for profile in &profiles[12..15] {
            assert_eq!(profile.mode, PadMode::Key);
        }
        assert_eq!(profiles[15].mode, PadMode::Toggle);
        assert_eq!(profiles[1].keycodes_on.as_slice(), &[Keycode::F13]);
        assert_eq!(profiles[11].keycodes_on.as_slice(), &[Keycode::F23]);
    }
}
