use std::fs;
use std::path::Path;

use serde_json::json;
use tempfile::TempDir;

/// One demonstration sub-directory.
#[derive(Debug, Clone)]
pub struct DemoSpec {
    pub name: String,
    pub object_x: f64,
    pub object_y: f64,
    pub heading: f64,
    /// Joint-angle rows (7 joints each). `None` leaves out `joint_angles.csv`.
    pub joint_rows: Option<Vec<[f64; 7]>>,
    pub region_of_interest: Option<f64>,
}

impl DemoSpec {
    /// A demonstration with the object at `(x, y)` and a neutral trajectory.
    pub fn at(name: &str, x: f64, y: f64) -> Self {
        Self {
            name: name.to_string(),
            object_x: x,
            object_y: y,
            heading: 0.0,
            joint_rows: Some(vec![[0.0, -0.5, 0.0, 1.0, 0.0, 0.5, 0.0]; 3]),
            region_of_interest: None,
        }
    }

    pub fn with_joints(mut self, rows: Vec<[f64; 7]>) -> Self {
        self.joint_rows = Some(rows);
        self
    }

    pub fn without_trajectory(mut self) -> Self {
        self.joint_rows = None;
        self
    }

    pub fn with_region_of_interest(mut self, value: f64) -> Self {
        self.region_of_interest = Some(value);
        self
    }
}

/// Writes a demonstration root: `config.json` plus one directory per demo.
pub struct DemoDirBuilder {
    config: serde_json::Value,
    demos: Vec<DemoSpec>,
}

impl DemoDirBuilder {
    /// `dimensions` are `(name, min, max, n_segments)`.
    pub fn new(dimensions: &[(&str, f64, f64, usize)], n_objects: usize, initial_joint_config: &[f64]) -> Self {
        let dims: Vec<_> = dimensions
            .iter()
            .map(|(name, min, max, n)| json!({"name": name, "min": min, "max": max, "n_segments": n}))
            .collect();
        Self {
            config: json!({
                "dimensions": dims,
                "initial_joint_config": initial_joint_config,
                "n_objects": n_objects,
            }),
            demos: Vec::new(),
        }
    }

    /// The 4x4-segment tabletop used across the tests: x and y with four
    /// segments each, heading with one.
    pub fn tabletop() -> Self {
        Self::new(
            &[
                ("x", 0.6602, 1.2602, 4),
                ("y", -0.185, 0.756, 4),
                ("θ", 0.0, std::f64::consts::TAU, 1),
            ],
            1,
            &[0.0; 7],
        )
    }

    pub fn joint_limits(mut self, limits: &[[f64; 2]]) -> Self {
        self.config["joint_limits"] = json!(limits);
        self
    }

    pub fn demo(mut self, spec: DemoSpec) -> Self {
        self.demos.push(spec);
        self
    }

    pub fn build(self) -> TempDir {
        let dir = TempDir::new().expect("demo root");
        self.write_to(dir.path());
        dir
    }

    pub fn write_to(&self, root: &Path) {
        fs::write(
            root.join("config.json"),
            serde_json::to_string_pretty(&self.config).expect("config json"),
        )
        .expect("write config.json");

        for demo in &self.demos {
            let dir = root.join(&demo.name);
            fs::create_dir_all(&dir).expect("demo dir");

            let (sin, cos) = demo.heading.sin_cos();
            let poses = format!(
                "{cos},{},0,{}\n{sin},{cos},0,{}\n0,0,1,-0.0644\n0,0,0,1\n",
                -sin, demo.object_x, demo.object_y
            );
            fs::write(dir.join("object_poses.csv"), poses).expect("object_poses.csv");

            if let Some(rows) = &demo.joint_rows {
                let mut csv = String::from("time,s0,s1,e0,e1,w0,w1,w2\n");
                for (t, row) in rows.iter().enumerate() {
                    let joints: Vec<String> = row.iter().map(f64::to_string).collect();
                    csv.push_str(&format!("{}.0,{}\n", t, joints.join(",")));
                }
                fs::write(dir.join("joint_angles.csv"), csv).expect("joint_angles.csv");
            }

            if let Some(roi) = demo.region_of_interest {
                fs::write(dir.join("region_of_interest.txt"), roi.to_string())
                    .expect("region_of_interest.txt");
            }
        }
    }
}
