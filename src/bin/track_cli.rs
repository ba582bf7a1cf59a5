#[cfg(target_arch = "wasm32")]
fn main() {
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(err) = native::run() {
        eprintln!("track_cli error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use coaster_engine::track::{
        MeshOptions, NormalMode, Point3, TrackDiagnostics, TrackMesh, build_track_mesh,
    };
    use std::fmt::Write as _;
    use std::fs::{self, File};
    use std::io::{BufWriter, Write};
    use std::path::{Path, PathBuf};

    const SNAPSHOT_QUANTIZE: f64 = 1e-6;
    const SNAPSHOT_DECIMALS: usize = 6;

    const USAGE: &str = r#"track_cli (coaster-engine)

USAGE:
  track_cli list
  track_cli run <scenario|all> [options]
  track_cli build <points-file> [options]

SCENARIOS:
  s_curve
  straight_run
  two_segment_hill
  excess_points
  vertical_climb

POINTS FILE:
  One control point per line as `x y z` (whitespace or comma separated).
  Empty lines and lines starting with `#` are skipped.

OPTIONS:
  --resolution <r>   Local parameter step per segment (build only)
  --width <w>        Lateral half-extent (build only)
  --height <h>       Vertical half-extent (build only)
  --smooth           Area-weighted smooth normals (build only)
  --out-dir <dir>    Write <scenario>.obj and/or <scenario>.snap to this dir (required for `all`)
  --obj <path>       Write OBJ (single scenario only)
  --snap <path>      Write golden-style snapshot (single scenario only)
  --no-obj           Skip OBJ when using --out-dir
  --no-snap          Skip snapshot when using --out-dir
  --overwrite        Overwrite existing output files
  -h, --help         Show this help
"#;

    pub fn run() -> Result<(), String> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let mut args = Args::new(args);

        let Some(command) = args.next() else {
            print_usage();
            return Ok(());
        };

        match command.as_str() {
            "list" => {
                print_scenarios();
                Ok(())
            }
            "run" => cmd_run(&mut args),
            "build" => cmd_build(&mut args),
            "-h" | "--help" | "help" => {
                print_usage();
                Ok(())
            }
            other => Err(format!("unknown command `{other}`\n\n{USAGE}")),
        }
    }

    fn print_usage() {
        println!("{USAGE}");
    }

    fn print_scenarios() {
        for scenario in Scenario::ALL {
            println!("{}", scenario.name());
        }
    }

    #[derive(Debug, Default)]
    struct OutputFlags {
        out_dir: Option<PathBuf>,
        obj_path: Option<PathBuf>,
        snap_path: Option<PathBuf>,
        overwrite: bool,
        skip_obj: bool,
        skip_snap: bool,
    }

    impl OutputFlags {
        /// Consumes `arg` if it is an output flag.
        fn accept(&mut self, arg: &str, args: &mut Args) -> Result<bool, String> {
            match arg {
                "--out-dir" => self.out_dir = Some(PathBuf::from(args.value("--out-dir")?)),
                "--obj" => self.obj_path = Some(PathBuf::from(args.value("--obj")?)),
                "--snap" => self.snap_path = Some(PathBuf::from(args.value("--snap")?)),
                "--overwrite" => self.overwrite = true,
                "--no-obj" => self.skip_obj = true,
                "--no-snap" => self.skip_snap = true,
                _ => return Ok(false),
            }
            Ok(true)
        }

        fn check(&self) -> Result<(), String> {
            if self.out_dir.is_some() && (self.obj_path.is_some() || self.snap_path.is_some()) {
                return Err("use either --out-dir or --obj/--snap (not both)".to_string());
            }
            if self.out_dir.is_some() && self.skip_obj && self.skip_snap {
                return Err("nothing to write (both --no-obj and --no-snap set)".to_string());
            }
            Ok(())
        }
    }

    fn cmd_run(args: &mut Args) -> Result<(), String> {
        let scenario_name = args.next().ok_or("missing scenario name")?;

        let mut flags = OutputFlags::default();
        while let Some(arg) = args.next() {
            if flags.accept(&arg, args)? {
                continue;
            }
            match arg.as_str() {
                "-h" | "--help" => {
                    print_usage();
                    return Ok(());
                }
                other => return Err(format!("unknown option `{other}`\n\n{USAGE}")),
            }
        }
        flags.check()?;

        if scenario_name == "all" {
            if flags.out_dir.is_none() {
                return Err("`run all` requires --out-dir".to_string());
            }
            for scenario in Scenario::ALL {
                emit(&run_scenario(*scenario), &flags)?;
            }
            return Ok(());
        }

        let scenario =
            Scenario::from_str(scenario_name.as_str()).ok_or_else(|| unknown_scenario(&scenario_name))?;
        emit(&run_scenario(scenario), &flags)
    }

    fn cmd_build(args: &mut Args) -> Result<(), String> {
        let path = PathBuf::from(args.next().ok_or("missing points file")?);

        let mut options = MeshOptions::default();
        let mut flags = OutputFlags::default();
        while let Some(arg) = args.next() {
            if flags.accept(&arg, args)? {
                continue;
            }
            match arg.as_str() {
                "--resolution" => options.resolution = args.number("--resolution")?,
                "--width" => options.width = args.number("--width")?,
                "--height" => options.height = args.number("--height")?,
                "--smooth" => options.normals = NormalMode::Smooth,
                "-h" | "--help" => {
                    print_usage();
                    return Ok(());
                }
                other => return Err(format!("unknown option `{other}`\n\n{USAGE}")),
            }
        }
        flags.check()?;

        let text = fs::read_to_string(&path).map_err(|e| format!("read {}: {e}", path.display()))?;
        let points = parse_points(&text)?;
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("track")
            .to_string();

        emit(&track_output(name, &points, &options), &flags)
    }

    fn parse_points(text: &str) -> Result<Vec<Point3>, String> {
        let mut points = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let values: Vec<f64> = line
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|s| !s.is_empty())
                .map(str::parse)
                .collect::<Result<_, _>>()
                .map_err(|e| format!("line {}: {e}", line_no + 1))?;
            let &[x, y, z] = values.as_slice() else {
                return Err(format!(
                    "line {}: expected 3 coordinates, got {}",
                    line_no + 1,
                    values.len()
                ));
            };
            points.push(Point3::new(x, y, z));
        }
        Ok(points)
    }

    fn emit(output: &TrackOutput, flags: &OutputFlags) -> Result<(), String> {
        if let Some(dir) = flags.out_dir.as_deref() {
            fs::create_dir_all(dir).map_err(|e| format!("create out dir: {e}"))?;
            if !flags.skip_snap {
                let path = dir.join(format!("{}.snap", output.name));
                write_text_file(&path, &output.snapshot, flags.overwrite)?;
                eprintln!("wrote {}", path.display());
            }
            if !flags.skip_obj {
                let path = dir.join(format!("{}.obj", output.name));
                write_obj_file(&path, &output.mesh, &output.name, flags.overwrite)?;
                eprintln!("wrote {}", path.display());
            }
        } else {
            if let Some(path) = flags.snap_path.as_deref() {
                write_text_file(path, &output.snapshot, flags.overwrite)?;
                eprintln!("wrote {}", path.display());
            } else {
                print!("{}", output.snapshot);
            }
            if let Some(path) = flags.obj_path.as_deref() {
                write_obj_file(path, &output.mesh, &output.name, flags.overwrite)?;
                eprintln!("wrote {}", path.display());
            }
        }

        eprintln!(
            "{}: vertices={} triangles={} | {}",
            output.name,
            output.mesh.vertex_count(),
            output.mesh.triangle_count(),
            output.diagnostics.summary()
        );
        Ok(())
    }

    fn unknown_scenario(name: &str) -> String {
        let mut msg = format!("unknown scenario `{name}`\n\navailable scenarios:\n");
        for scenario in Scenario::ALL {
            let _ = writeln!(msg, "  {}", scenario.name());
        }
        msg
    }

    fn write_text_file(path: &Path, text: &str, overwrite: bool) -> Result<(), String> {
        if path.exists() && !overwrite {
            return Err(format!(
                "refusing to overwrite existing file {} (use --overwrite)",
                path.display()
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| format!("create dir {}: {e}", parent.display()))?;
        }
        fs::write(path, normalize_snapshot_text(text)).map_err(|e| format!("write {}: {e}", path.display()))
    }

    fn write_obj_file(path: &Path, mesh: &TrackMesh, name: &str, overwrite: bool) -> Result<(), String> {
        mesh.validate().map_err(|e| format!("mesh validation failed: {e}"))?;

        if path.exists() && !overwrite {
            return Err(format!(
                "refusing to overwrite existing file {} (use --overwrite)",
                path.display()
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| format!("create dir {}: {e}", parent.display()))?;
        }

        let file = File::create(path).map_err(|e| format!("create {}: {e}", path.display()))?;
        let mut w = BufWriter::new(file);

        writeln!(w, "# coaster-engine track_cli").map_err(|e| format!("write obj: {e}"))?;
        writeln!(w, "o {name}").map_err(|e| format!("write obj: {e}"))?;

        for p in &mesh.positions {
            writeln!(w, "v {} {} {}", p[0], p[1], p[2]).map_err(|e| format!("write obj: {e}"))?;
        }
        for n in &mesh.normals {
            writeln!(w, "vn {} {} {}", n[0], n[1], n[2]).map_err(|e| format!("write obj: {e}"))?;
        }
        for tri in mesh.indices.chunks_exact(3) {
            let (a, b, c) = (tri[0] + 1, tri[1] + 1, tri[2] + 1);
            writeln!(w, "f {a}//{a} {b}//{b} {c}//{c}").map_err(|e| format!("write obj: {e}"))?;
        }

        w.flush().map_err(|e| format!("flush {}: {e}", path.display()))
    }

    fn normalize_snapshot_text(text: &str) -> String {
        let normalized = text.replace("\r\n", "\n");
        if normalized.ends_with('\n') {
            normalized
        } else {
            format!("{normalized}\n")
        }
    }

    fn quantize_f64(value: f64) -> f64 {
        if !value.is_finite() {
            return value;
        }
        let q = (value / SNAPSHOT_QUANTIZE).round() * SNAPSHOT_QUANTIZE;
        if q == 0.0 { 0.0 } else { q }
    }

    fn write_vec3_line(out: &mut String, prefix: &str, v: [f64; 3]) {
        let [x, y, z] = v.map(quantize_f64);
        let _ = writeln!(
            out,
            "{prefix} {x:.SNAPSHOT_DECIMALS$} {y:.SNAPSHOT_DECIMALS$} {z:.SNAPSHOT_DECIMALS$}"
        );
    }

    fn write_diagnostics(out: &mut String, diag: &TrackDiagnostics) {
        let _ = writeln!(out, "diag.segment_count {}", diag.segment_count);
        let _ = writeln!(out, "diag.ring_count {}", diag.ring_count);
        let _ = writeln!(out, "diag.vertex_count {}", diag.vertex_count);
        let _ = writeln!(out, "diag.triangle_count {}", diag.triangle_count);
        let _ = writeln!(out, "diag.excess_control_points {}", diag.excess_control_points);
        let _ = writeln!(out, "diag.degenerate_tangent_count {}", diag.degenerate_tangent_count);
        let _ = writeln!(out, "diag.degenerate_lateral_count {}", diag.degenerate_lateral_count);
        let _ = writeln!(out, "diag.resolution_clamped {}", diag.resolution_clamped);
        let _ = writeln!(out, "diag.open_edge_count {}", diag.open_edge_count);
        let _ = writeln!(out, "diag.non_manifold_edge_count {}", diag.non_manifold_edge_count);
        let _ = writeln!(out, "diag.warning_count {}", diag.warnings.len());
        for (idx, warning) in diag.warnings.iter().enumerate() {
            let _ = writeln!(out, "diag.warning.{idx} {warning}");
        }
    }

    fn write_mesh(out: &mut String, mesh: &TrackMesh) {
        let _ = writeln!(out, "mesh.positions {}", mesh.positions.len());
        for p in &mesh.positions {
            write_vec3_line(out, "p", *p);
        }

        let _ = writeln!(out, "mesh.indices {}", mesh.indices.len());
        for tri in mesh.indices.chunks_exact(3) {
            let _ = writeln!(out, "i {} {} {}", tri[0], tri[1], tri[2]);
        }

        let _ = writeln!(out, "mesh.normals {}", mesh.normals.len());
        for n in &mesh.normals {
            write_vec3_line(out, "n", *n);
        }
    }

    fn snapshot(name: &str, options: &MeshOptions, mesh: &TrackMesh, diag: &TrackDiagnostics) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# coaster-engine golden v1");
        let _ = writeln!(out, "track {name}");
        let _ = writeln!(out, "quantize {SNAPSHOT_QUANTIZE:.1e}");
        let _ = writeln!(out, "options.resolution {}", options.resolution);
        let _ = writeln!(out, "options.width {}", options.width);
        let _ = writeln!(out, "options.height {}", options.height);
        let _ = writeln!(out, "options.normals {:?}", options.normals);
        write_diagnostics(&mut out, diag);
        write_mesh(&mut out, mesh);
        normalize_snapshot_text(&out)
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Scenario {
        SCurve,
        StraightRun,
        TwoSegmentHill,
        ExcessPoints,
        VerticalClimb,
    }

    impl Scenario {
        const ALL: &'static [Scenario] = &[
            Scenario::SCurve,
            Scenario::StraightRun,
            Scenario::TwoSegmentHill,
            Scenario::ExcessPoints,
            Scenario::VerticalClimb,
        ];

        fn name(self) -> &'static str {
            match self {
                Scenario::SCurve => "s_curve",
                Scenario::StraightRun => "straight_run",
                Scenario::TwoSegmentHill => "two_segment_hill",
                Scenario::ExcessPoints => "excess_points",
                Scenario::VerticalClimb => "vertical_climb",
            }
        }

        fn from_str(name: &str) -> Option<Self> {
            Self::ALL.iter().copied().find(|s| s.name() == name)
        }

        fn control_points(self) -> Vec<Point3> {
            match self {
                Scenario::SCurve => vec![
                    Point3::new(0.0, 0.0, 0.0),
                    Point3::new(1.0, 1.0, 0.0),
                    Point3::new(2.0, -1.0, 0.0),
                    Point3::new(3.0, 0.0, 0.0),
                ],
                Scenario::StraightRun => (0..4).map(|i| Point3::new(0.0, 0.0, f64::from(i))).collect(),
                Scenario::TwoSegmentHill => vec![
                    Point3::new(0.0, 0.0, 0.0),
                    Point3::new(2.0, 0.0, 0.0),
                    Point3::new(3.0, 2.0, 0.0),
                    Point3::new(5.0, 3.0, 0.0),
                    Point3::new(7.0, 4.0, 0.0),
                    Point3::new(8.0, 0.0, 1.0),
                    Point3::new(10.0, 0.0, 2.0),
                ],
                Scenario::ExcessPoints => vec![
                    Point3::new(0.0, 0.0, 0.0),
                    Point3::new(1.0, 0.0, 1.0),
                    Point3::new(2.0, 0.0, 1.0),
                    Point3::new(3.0, 0.0, 0.0),
                    Point3::new(4.0, 0.0, -1.0),
                ],
                Scenario::VerticalClimb => (0..4).map(|i| Point3::new(0.0, f64::from(i), 0.0)).collect(),
            }
        }

        fn options(self) -> MeshOptions {
            MeshOptions {
                resolution: 0.1,
                width: 1.0,
                height: 0.2,
                ..MeshOptions::default()
            }
        }
    }

    struct TrackOutput {
        name: String,
        mesh: TrackMesh,
        diagnostics: TrackDiagnostics,
        snapshot: String,
    }

    fn track_output(name: String, points: &[Point3], options: &MeshOptions) -> TrackOutput {
        let (mesh, diagnostics) = build_track_mesh(points, options);
        let snapshot = snapshot(&name, options, &mesh, &diagnostics);
        TrackOutput {
            name,
            mesh,
            diagnostics,
            snapshot,
        }
    }

    fn run_scenario(scenario: Scenario) -> TrackOutput {
        track_output(
            scenario.name().to_string(),
            &scenario.control_points(),
            &scenario.options(),
        )
    }

    struct Args {
        args: Vec<String>,
        pos: usize,
    }

    impl Args {
        fn new(args: Vec<String>) -> Self {
            Self { args, pos: 0 }
        }

        fn next(&mut self) -> Option<String> {
            let arg = self.args.get(self.pos)?.clone();
            self.pos += 1;
            Some(arg)
        }

        fn value(&mut self, flag: &str) -> Result<String, String> {
            self.next()
                .ok_or_else(|| format!("missing value for {flag}"))
        }

        fn number(&mut self, flag: &str) -> Result<f64, String> {
            let raw = self.value(flag)?;
            raw.parse()
                .map_err(|e| format!("invalid value `{raw}` for {flag}: {e}"))
        }
    }
}
