//! Kestrel entry point.
//!
//! Loads a raw program image (or the built-in demo) at $8000 and runs it,
//! either in a window or headless.
//! Usage: kestrel [path/to/program.bin] [--headless --frames N --screenshot out.png]

use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use ansi_term::Colour::{Green, Red, Yellow};
use clap::Parser;
use minifb::{Key, KeyRepeat, Window, WindowOptions};

use kestrel::{
    bus::MemoryBus,
    capture,
    config::{
        EmulatorConfig, FRAME_DELAY, FrameSource, RESET_PC, SCREEN_HEIGHT, SCREEN_WIDTH,
    },
    display::{Command, Display, FrameRecorder},
    emulator::Emulator,
    error::EmuError,
    ppu::image::Image,
    rom,
    scheduler::{Clock, ManualClock, Scheduler, SystemClock},
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Raw program image; runs the built-in demo when omitted.
    rom: Option<PathBuf>,

    /// Address the image is installed at.
    #[arg(long, value_parser = parse_addr, default_value = "0x8000")]
    load_addr: u32,

    /// Instructions executed per frame.
    #[arg(long, default_value_t = 100)]
    steps_per_frame: u32,

    /// Delay between frames in milliseconds.
    #[arg(long, default_value_t = 16)]
    frame_delay_ms: u64,

    /// Stop after this many frames (headless default: 60).
    #[arg(long)]
    frames: Option<u64>,

    /// Build each frame from bus memory at ADDR instead of the test pattern.
    #[arg(long, value_name = "ADDR", value_parser = parse_addr)]
    video_ram: Option<u32>,

    /// Run without a window and without pacing.
    #[arg(long)]
    headless: bool,

    /// Save the last frame as a PNG.
    #[arg(long, value_name = "PATH")]
    screenshot: Option<PathBuf>,

    /// Log every executed instruction.
    #[arg(long)]
    trace: bool,
}

fn parse_addr(s: &str) -> Result<u32, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("$")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("bad address {s:?}: {e}"))
}

/// minifb window. Enter starts, P pauses, S stops, Escape or closing quits.
struct WindowDisplay {
    window: Window,
    blank: Vec<u32>,
    last: Option<Image>,
    quit: bool,
}

impl WindowDisplay {
    fn new() -> Result<Self, minifb::Error> {
        let mut window = Window::new(
            "Kestrel",
            SCREEN_WIDTH,
            SCREEN_HEIGHT,
            WindowOptions {
                resize: true,
                scale: minifb::Scale::X2,
                scale_mode: minifb::ScaleMode::AspectRatioStretch,
                ..WindowOptions::default()
            },
        )?;
        window.set_title("Kestrel - Ready");
        Ok(Self {
            window,
            blank: vec![0; SCREEN_WIDTH * SCREEN_HEIGHT],
            last: None,
            quit: false,
        })
    }

    fn status(&mut self, text: &str) {
        println!("{} {}", Green.bold().paint("INFO"), text);
        self.window.set_title(&format!("Kestrel - {text}"));
    }
}

impl Display for WindowDisplay {
    fn draw(&mut self, image: &Image) -> Result<(), EmuError> {
        self.window
            .update_with_buffer(image.pixels(), image.width(), image.height())
            .map_err(|e| EmuError::Present(e.to_string()))?;
        self.last = Some(image.clone());
        Ok(())
    }

    fn clear(&mut self) {
        if let Err(e) = self
            .window
            .update_with_buffer(&self.blank, SCREEN_WIDTH, SCREEN_HEIGHT)
        {
            log::warn!("window update failed: {e}");
        }
    }

    fn poll(&mut self) -> Vec<Command> {
        self.window.update();
        if self.quit || !self.window.is_open() {
            self.quit = true;
            return vec![Command::Quit];
        }

        let mut commands = Vec::new();
        for key in self.window.get_keys_pressed(KeyRepeat::No) {
            let (command, text) = match key {
                Key::Enter => (Command::Start, "Running"),
                Key::P => (Command::Pause, "Paused"),
                Key::S => (Command::Stop, "Stopped"),
                Key::Escape => (Command::Quit, "Stopped"),
                _ => continue,
            };
            self.status(text);
            if command == Command::Quit {
                self.quit = true;
            }
            commands.push(command);
        }
        commands
    }
}

fn run_windowed(
    mut scheduler: Scheduler<MemoryBus, SystemClock>,
) -> Result<Option<Image>, Box<dyn Error>> {
    let mut display = WindowDisplay::new()?;
    display.status("Running");
    scheduler.start();

    loop {
        scheduler.run(&mut display)?;
        if display.quit {
            break;
        }
        // Stopped: idle until started again or closed.
        let mut clock = SystemClock::new();
        'idle: loop {
            for command in display.poll() {
                match command {
                    Command::Start => {
                        scheduler.start();
                        break 'idle;
                    }
                    Command::Quit => return Ok(display.last),
                    Command::Pause | Command::Stop => {}
                }
            }
            clock.rearm(FRAME_DELAY);
        }
    }
    Ok(display.last)
}

fn run_headless(
    mut scheduler: Scheduler<MemoryBus, ManualClock>,
) -> Result<Option<Image>, Box<dyn Error>> {
    let mut display = FrameRecorder::new();
    scheduler.start();
    let frames = scheduler.run(&mut display)?;
    println!(
        "{} ran {} frame(s), {} instruction(s), pc=${:04X}",
        Green.bold().paint("INFO"),
        frames,
        scheduler.emulator.cpu.steps,
        scheduler.emulator.cpu.pc
    );
    Ok(display.last)
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = EmulatorConfig {
        steps_per_frame: args.steps_per_frame,
        frame_delay: Duration::from_millis(args.frame_delay_ms),
        load_addr: args.load_addr,
        frame_source: match args.video_ram {
            Some(base) => FrameSource::VideoRam { base },
            None => FrameSource::TestPattern,
        },
        max_frames: args.frames.or(if args.headless { Some(60) } else { None }),
        ..EmulatorConfig::default()
    };

    let mut emulator = Emulator::new(config);
    match &args.rom {
        Some(path) => {
            let program = rom::read_program(path, emulator.config.max_program_len)?;
            emulator.load_program(emulator.config.load_addr, &program)?;
            println!(
                "{} Loaded: {}",
                Green.bold().paint("INFO"),
                path.file_name().unwrap_or_default().to_string_lossy()
            );
        }
        None => {
            emulator.load_program(u32::from(RESET_PC), &rom::DEMO_PROGRAM)?;
            println!("{} no program given, running demo", Yellow.bold().paint("WARN"));
        }
    }

    let last = if args.headless {
        run_headless(Scheduler::new(emulator, ManualClock::default()))?
    } else {
        run_windowed(Scheduler::new(emulator, SystemClock::new()))?
    };

    if let Some(path) = &args.screenshot {
        match &last {
            Some(image) => {
                capture::save_png(image, path)?;
                println!("{} saved {}", Green.bold().paint("INFO"), path.display());
            }
            None => println!("{} no frame to save", Yellow.bold().paint("WARN")),
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.trace { "trace" } else { "warn" }),
    )
    .init();

    if let Err(e) = run(args) {
        eprintln!("{} {}", Red.bold().paint("ERROR"), e);
        std::process::exit(1);
    }
}
