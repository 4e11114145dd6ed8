#[cfg(test)]
mod tests {
    use assert_fs::prelude::*;
    use assert_fs::TempDir;
    use rizer::{
        load_config, resolve, AssumeYes, CliOptions, Confirm, Level, LevelSelection, Mode,
        Options, PlanEntry, Rizer, RizerError, RunOutcome, RunReport, TargetStatus,
    };
    use std::fs;
    use std::path::Path;

    struct Decline;

    impl Confirm for Decline {
        fn confirm(&self, _prompt: &str) -> rizer::Result<bool> {
            Ok(false)
        }
    }

    fn write_source(dir: &TempDir, name: &str, width: u32, height: u32) -> std::path::PathBuf {
        let input = dir.child(name);
        image::RgbImage::from_pixel(width, height, image::Rgb([200, 120, 40]))
            .save(input.path())
            .unwrap();
        input.path().to_path_buf()
    }

    fn cli_levels(mode: Mode, values: &[&str], out: &Path) -> CliOptions {
        CliOptions {
            selection: Some(LevelSelection::Levels(
                mode,
                values.iter().map(|v| Level::new(*v)).collect(),
            )),
            output_directory: Some(out.to_path_buf()),
            ..Default::default()
        }
    }

    fn completed(outcome: RunOutcome) -> RunReport {
        match outcome {
            RunOutcome::Completed(report) => report,
            RunOutcome::Declined => panic!("run was declined"),
        }
    }

    fn files_in(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .map(|e| e.file_name().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }

    #[test]
    fn ratios_on_1000_by_800_skip_the_upscale() {
        let temp_dir = TempDir::new().unwrap();
        let input = write_source(&temp_dir, "photo.png", 1000, 800);
        let out = temp_dir.child("out");

        let options = resolve(
            cli_levels(Mode::Ratio, &["0.25", "0.5", "1.5"], out.path()),
            Default::default(),
        );
        let report = completed(Rizer::new(options).run(&input, &AssumeYes).unwrap());

        assert_eq!(report.generated(), 2);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.failed(), 0);
        assert_eq!(files_in(out.path()), vec!["photo@0.25.png", "photo@0.5.png"]);

        let quarter = image::open(out.child("photo@0.25.png").path()).unwrap();
        assert_eq!((quarter.width(), quarter.height()), (250, 200));
        let half = image::open(out.child("photo@0.5.png").path()).unwrap();
        assert_eq!((half.width(), half.height()), (500, 400));
    }

    #[test]
    fn width_beyond_original_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let input = write_source(&temp_dir, "photo.png", 1000, 500);
        let out = temp_dir.child("out");

        let options = resolve(
            cli_levels(Mode::Width, &["2000"], out.path()),
            Default::default(),
        );
        let report = completed(Rizer::new(options).run(&input, &AssumeYes).unwrap());

        assert_eq!(report.plan.len(), 1);
        assert!(report.plan[0].is_skipped());
        assert!(report.outcomes.is_empty());
        assert!(files_in(out.path()).is_empty());
    }

    #[test]
    fn allow_upscale_produces_the_exact_width() {
        let temp_dir = TempDir::new().unwrap();
        let input = write_source(&temp_dir, "photo.png", 100, 50);
        let out = temp_dir.child("out");

        let mut cli = cli_levels(Mode::Width, &["200"], out.path());
        cli.allow_upscale = Some(true);
        let report = completed(
            Rizer::new(resolve(cli, Default::default()))
                .run(&input, &AssumeYes)
                .unwrap(),
        );

        assert_eq!(report.generated(), 1);
        let big = image::open(out.child("photo@200px.png").path()).unwrap();
        assert_eq!((big.width(), big.height()), (200, 100));
    }

    #[test]
    fn failing_target_is_isolated() {
        let temp_dir = TempDir::new().unwrap();
        let input = write_source(&temp_dir, "photo.png", 300, 300);
        let out = temp_dir.child("out");
        // occupy the second target's path with a directory
        out.child("photo@200px.png").create_dir_all().unwrap();

        let options = resolve(
            cli_levels(Mode::Width, &["100", "200", "300"], out.path()),
            Default::default(),
        );
        let report = completed(Rizer::new(options).run(&input, &AssumeYes).unwrap());

        assert_eq!(report.outcomes.len(), 3);
        assert_eq!(report.outcomes[0].suffix, "@100px");
        assert!(report.outcomes[0].is_written());
        assert_eq!(report.outcomes[1].suffix, "@200px");
        assert!(matches!(report.outcomes[1].status, TargetStatus::Failed { .. }));
        assert_eq!(report.outcomes[2].suffix, "@300px");
        assert!(report.outcomes[2].is_written());
        assert!(out.child("photo@100px.png").path().is_file());
        assert!(out.child("photo@300px.png").path().is_file());
    }

    #[test]
    fn huge_upscale_fails_alone() {
        let temp_dir = TempDir::new().unwrap();
        let input = write_source(&temp_dir, "photo.png", 10, 10);
        let out = temp_dir.child("out");

        let mut cli = cli_levels(Mode::Width, &["5", "4294967295"], out.path());
        cli.allow_upscale = Some(true);
        let report = completed(
            Rizer::new(resolve(cli, Default::default()))
                .run(&input, &AssumeYes)
                .unwrap(),
        );

        assert_eq!(report.outcomes.len(), 2);
        assert_eq!(report.generated(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.outcomes[1].suffix, "@4294967295px");
        assert!(matches!(report.outcomes[1].status, TargetStatus::Failed { .. }));
        assert_eq!(files_in(out.path()), vec!["photo@5px.png"]);
    }

    #[test]
    fn width_count_generates_interior_sizes() {
        let temp_dir = TempDir::new().unwrap();
        let input = write_source(&temp_dir, "tile.png", 400, 200);
        let out = temp_dir.child("out");

        let cli = CliOptions {
            selection: Some(LevelSelection::Count(Mode::Width, 3)),
            output_directory: Some(out.path().to_path_buf()),
            ..Default::default()
        };
        let report = completed(
            Rizer::new(resolve(cli, Default::default()))
                .run(&input, &AssumeYes)
                .unwrap(),
        );

        let suffixes: Vec<&str> = report
            .plan
            .iter()
            .filter_map(PlanEntry::target)
            .map(|t| t.suffix.as_str())
            .collect();
        assert_eq!(suffixes, vec!["@100px", "@200px", "@300px"]);
        assert_eq!(report.generated(), 3);
    }

    #[test]
    fn ambiguous_width_can_be_declined() {
        let temp_dir = TempDir::new().unwrap();
        let input = write_source(&temp_dir, "photo.png", 100, 100);
        let out = temp_dir.child("out");

        let options = resolve(
            cli_levels(Mode::Width, &["0.5"], out.path()),
            Default::default(),
        );
        let outcome = Rizer::new(options).run(&input, &Decline).unwrap();

        assert!(matches!(outcome, RunOutcome::Declined));
        assert!(!out.path().exists());
    }

    #[test]
    fn config_file_drives_the_run() {
        let temp_dir = TempDir::new().unwrap();
        let input = write_source(&temp_dir, "banner.png", 800, 400);
        temp_dir
            .child(".rizerrc.json")
            .write_str(
                r#"{
                    "mode": "height",
                    "levels": [100, 200],
                    "filenamePattern": "${name}-${suffix}${ext}",
                    "outputFormat": "jpeg",
                    "outputDirectory": "thumbs"
                }"#,
            )
            .unwrap();

        let file = load_config(false, temp_dir.path()).unwrap();
        let mut options: Options = resolve(CliOptions::default(), file);
        options.output_directory = temp_dir.path().join(&options.output_directory);

        let report = completed(Rizer::new(options).run(&input, &AssumeYes).unwrap());

        assert_eq!(report.generated(), 2);
        assert_eq!(
            files_in(&temp_dir.path().join("thumbs")),
            vec!["banner-@100px.jpg", "banner-@200px.jpg"]
        );
        let small = image::open(temp_dir.path().join("thumbs/banner-@100px.jpg")).unwrap();
        assert_eq!((small.width(), small.height()), (200, 100));
    }

    #[test]
    fn invalid_config_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        temp_dir
            .child(".rizerrc")
            .write_str(r#"{ "mode": "zoom", "levels": "half" }"#)
            .unwrap();

        let result = load_config(false, temp_dir.path());
        match result {
            Err(RizerError::InvalidConfig { errors, .. }) => assert_eq!(errors.len(), 2),
            other => panic!("expected invalid config, got {:?}", other),
        }
    }

    #[test]
    fn missing_input_file() {
        let temp_dir = TempDir::new().unwrap();
        let rizer = Rizer::new(Options::default());
        let result = rizer.run(&temp_dir.path().join("nonexistent.jpg"), &AssumeYes);
        assert!(matches!(result, Err(RizerError::InputNotFound(_))));
    }
}
