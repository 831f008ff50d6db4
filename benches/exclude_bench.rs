use async_trait::async_trait;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use drive_mirror::drive::{DriveBackend, DriveResult, RemoteNode};
use drive_mirror::exclude::ExclusionRules;
use drive_mirror::mirror::mirror;
use std::collections::HashMap;
use std::hint::black_box;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::runtime::Runtime;

/// Synthetic remote tree served from memory.
struct SyntheticDrive {
    folders: HashMap<String, Vec<RemoteNode>>,
}

impl SyntheticDrive {
    fn new(depth: usize, files_per_dir: usize, dirs_per_level: usize) -> Self {
        fn create_level(
            folders: &mut HashMap<String, Vec<RemoteNode>>,
            id: String,
            current_depth: usize,
            max_depth: usize,
            files_per_dir: usize,
            dirs_per_level: usize,
        ) {
            let mut children = Vec::new();
            for i in 0..files_per_dir {
                children.push(RemoteNode::file(format!("{id}/f{i}"), format!("file_{i}.txt")));
            }
            if current_depth < max_depth {
                for i in 0..dirs_per_level {
                    let child = format!("{id}/d{i}");
                    children.push(RemoteNode::folder(child.clone(), format!("dir:{i}")));
                    create_level(folders, child, current_depth + 1, max_depth, files_per_dir, dirs_per_level);
                }
            }
            folders.insert(id, children);
        }

        let mut folders = HashMap::new();
        create_level(&mut folders, "root".to_string(), 0, depth, files_per_dir, dirs_per_level);
        Self { folders }
    }
}

#[async_trait]
impl DriveBackend for SyntheticDrive {
    async fn list_children(&self, folder_id: &str) -> DriveResult<Vec<RemoteNode>> {
        Ok(self.folders.get(folder_id).cloned().unwrap_or_default())
    }

    async fn download_file(&self, file_id: &str, dest: &Path) -> DriveResult<u64> {
        tokio::fs::write(dest, file_id.as_bytes()).await?;
        Ok(file_id.len() as u64)
    }
}

fn benchmark_segment_match(c: &mut Criterion) {
    let path = PathBuf::from("/home/user/drive/Courses/CSE306/Lectures/week-07/slides.pdf");
    let mut group = c.benchmark_group("segment_match");

    for count in [1usize, 8, 64].iter() {
        let patterns: Vec<String> = (0..*count).map(|i| format!("*.ext{i}")).collect();
        let rules = ExclusionRules::new(patterns);
        group.bench_with_input(BenchmarkId::from_parameter(count), &rules, |b, rules| {
            b.iter(|| black_box(rules.first_segment_match(black_box(&path))))
        });
    }
    group.finish();
}

fn benchmark_mirror_existing_tree(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let drive = SyntheticDrive::new(3, 10, 3);
    let temp_dir = TempDir::new().unwrap();
    let dest = temp_dir.path().join("out");
    let dir_rules = ExclusionRules::new(["cache-*", "node_modules"]);
    let file_rules = ExclusionRules::new(["*.tmp", "*.bak"]);

    // First run downloads everything; the benchmark measures the idempotent pass
    rt.block_on(mirror(&drive, "root", &dest, &dir_rules, &file_rules)).unwrap();

    c.bench_function("mirror_existing_tree", |b| {
        b.iter(|| {
            rt.block_on(async {
                black_box(mirror(&drive, "root", &dest, &dir_rules, &file_rules).await)
            })
        })
    });
}

criterion_group!(benches, benchmark_segment_match, benchmark_mirror_existing_tree);
criterion_main!(benches);
