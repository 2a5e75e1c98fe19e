use clap::Parser;
use gymrat::application::{parse_date, ConfigService, WorkoutEdit, WorkoutLogService};
use gymrat::cli::{format_workout_detail, format_workout_list, Cli, Commands};
use gymrat::error::{GymRatError, Result};
use gymrat::infrastructure::{resolve_data_dir, Config, LoadStatus, WorkoutRepository};
use std::path::PathBuf;

fn main() {
    let cli = Cli::parse();

    init_logging(cli.debug);

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

/// Convert a 1-based position from the command line
fn position(n: usize) -> Result<usize> {
    n.checked_sub(1)
        .ok_or_else(|| GymRatError::InvalidInput("Positions start at 1".to_string()))
}

fn run(cli: Cli) -> Result<()> {
    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;
    log::debug!("Using data directory {}", data_dir.display());

    match cli.command {
        Commands::Config { key, value, list } => {
            run_config(ConfigService::new(data_dir), key, value, list)
        }
        Commands::List => {
            let (service, _) = open_log(data_dir)?;
            let repo = service.repository();
            println!(
                "{}",
                format_workout_list(service.workouts(), repo.selected_index()).trim_end()
            );
            Ok(())
        }
        Commands::Show { workout } => {
            let (service, config) = open_log(data_dir)?;
            let repo = service.repository();
            let index = match workout {
                Some(n) => position(n)?,
                None => repo.selected_index().ok_or_else(|| {
                    GymRatError::InvalidInput(
                        "No workout selected. Pass a position or run 'gymrat select <N>'"
                            .to_string(),
                    )
                })?,
            };
            let photo = repo.photo_path(index)?;
            println!(
                "{}",
                format_workout_detail(
                    repo.workout(index)?,
                    config.weight_unit,
                    photo.as_deref()
                )
                .trim_end()
            );
            Ok(())
        }
        Commands::Add {
            name,
            date,
            location,
        } => {
            let (mut service, _) = open_log(data_dir)?;
            let date = parse_date(&date)?;
            let index = service.add_workout(&name, date, location.as_deref())?;
            service.persist()?;
            println!("Added workout {}: {}", index + 1, name.trim());
            Ok(())
        }
        Commands::Edit {
            workout,
            name,
            date,
            location,
        } => {
            let (mut service, _) = open_log(data_dir)?;
            let edit = WorkoutEdit {
                name,
                date: date.as_deref().map(parse_date).transpose()?,
                location,
            };
            service.edit_workout(position(workout)?, edit)?;
            service.persist()?;
            println!("Updated workout {}", workout);
            Ok(())
        }
        Commands::Remove { workout } => {
            let (mut service, _) = open_log(data_dir)?;
            let removed = service.delete_workout(position(workout)?)?;
            service.persist()?;
            println!("Removed workout: {}", removed.name);
            Ok(())
        }
        Commands::Select { workout, clear } => {
            let (mut service, _) = open_log(data_dir)?;
            if clear {
                service.select(None)?;
                println!("Selection cleared");
            } else if let Some(n) = workout {
                service.select(Some(position(n)?))?;
                println!("Selected workout {}", n);
            } else {
                match service.repository().selected_index() {
                    Some(i) => println!("{}", i + 1),
                    None => println!("No workout selected"),
                }
            }
            Ok(())
        }
        Commands::AddExercise { workout, name } => {
            let (mut service, _) = open_log(data_dir)?;
            let index = service.add_exercise(position(workout)?, &name)?;
            service.persist()?;
            println!("Added exercise {}: {}", index + 1, name.trim());
            Ok(())
        }
        Commands::RemoveExercise { workout, exercise } => {
            let (mut service, _) = open_log(data_dir)?;
            service.remove_exercise(position(workout)?, position(exercise)?)?;
            service.persist()?;
            println!("Removed exercise {}", exercise);
            Ok(())
        }
        Commands::AddSet {
            workout,
            exercise,
            weight,
            reps,
            effort,
        } => {
            let (mut service, _) = open_log(data_dir)?;
            let number =
                service.add_set(position(workout)?, position(exercise)?, weight, reps, effort)?;
            service.persist()?;
            println!("Recorded Set {}", number);
            Ok(())
        }
        Commands::RemoveSet {
            workout,
            exercise,
            set,
        } => {
            let (mut service, _) = open_log(data_dir)?;
            service.remove_set(position(workout)?, position(exercise)?, position(set)?)?;
            service.persist()?;
            println!("Removed set {}", set);
            Ok(())
        }
        Commands::Photo { workout, path } => {
            let (mut service, _) = open_log(data_dir)?;
            let index = position(workout)?;
            service.attach_photo(index, &path)?;
            service.persist()?;
            print_photo_path(&service, index)
        }
        Commands::RemovePhoto { workout } => {
            let (mut service, _) = open_log(data_dir)?;
            service.detach_photo(position(workout)?)?;
            service.persist()?;
            println!("Photo removed");
            Ok(())
        }
    }
}

/// Load the config and open the workout log in `data_dir`
fn open_log(data_dir: PathBuf) -> Result<(WorkoutLogService, Config)> {
    let config = Config::load_from_dir(&data_dir)?;
    let repo = WorkoutRepository::open_with_config(data_dir, &config)?;
    if let LoadStatus::Corrupt(reason) = repo.last_load_status() {
        eprintln!(
            "Warning: saved workouts could not be read ({}); starting with an empty log",
            reason
        );
    }
    Ok((WorkoutLogService::new(repo), config))
}

fn print_photo_path(service: &WorkoutLogService, index: usize) -> Result<()> {
    if let Some(path) = service.repository().photo_path(index)? {
        println!("Saved photo to {}", path.display());
    }
    Ok(())
}

fn run_config(
    service: ConfigService,
    key: Option<String>,
    value: Option<String>,
    list: bool,
) -> Result<()> {
    if list {
        let config = service.list()?;
        println!("photo_quality = {}", config.photo_quality);
        println!("weight_unit = {}", config.weight_unit);
        return Ok(());
    }

    match (key, value) {
        (Some(k), Some(v)) => {
            service.set(&k, &v)?;
            println!("Set {} = {}", k, v);
        }
        (Some(k), None) => {
            println!("{}", service.get(&k)?);
        }
        (None, _) => {
            println!("Usage: gymrat config [--list | <key> [<value>]]");
            println!("Valid keys: photo_quality, weight_unit");
        }
    }
    Ok(())
}
