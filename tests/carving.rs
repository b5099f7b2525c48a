use image::{ImageBuffer, Rgb, RgbImage};
use sobelseam::visualize::energy_to_image;
use sobelseam::{
    calculate_energy, remove_vertical_seam, seamcarve, EnergyRefresh, SeamCarver, SeamGraph,
    SeamSelector, Target,
};

// A deterministic, busy test image.
fn noisy(width: u32, height: u32) -> RgbImage {
    let mut state: u32 = 0x2545_f491;
    ImageBuffer::from_fn(width, height, |_, _| {
        let mut channel = || {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        };
        Rgb([channel(), channel(), channel()])
    })
}

#[test]
fn single_column_images_have_a_single_seam() {
    let image: RgbImage = ImageBuffer::from_fn(1, 6, |_, y| Rgb([(y * 40) as u8, 0, 0]));
    let energy = calculate_energy(&image);
    let graph = SeamGraph::new(&energy);
    let candidates = SeamSelector::new(&graph).candidates();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].columns, vec![0; 6]);
    let total: f64 = energy.values().sum();
    assert_eq!(candidates[0].cost, total);
}

#[test]
fn uniform_images_carve_from_the_left_edge() {
    let image = RgbImage::from_pixel(6, 4, Rgb([90, 140, 30]));
    let energy = calculate_energy(&image);
    assert!(energy_to_image(&energy).pixels().all(|p| p[0] == 0));

    let graph = SeamGraph::new(&energy);
    let seam = SeamSelector::new(&graph).best().unwrap();
    assert_eq!(seam.columns, vec![0; 4]);
    assert_eq!(seam.cost, 0.0);
}

#[test]
fn the_brightest_energy_is_white() {
    let energy = calculate_energy(&noisy(12, 9));
    let picture = energy_to_image(&energy);
    let max = energy.values().cloned().fold(0.0, f64::max);
    assert!(max > 0.0);
    for y in 0..9 {
        for x in 0..12 {
            assert!(energy[(x, y)] >= 0.0);
            if energy[(x, y)] == max {
                assert_eq!(picture.get_pixel(x, y)[0], 255);
            }
        }
    }
}

#[test]
fn cumulative_costs_hold_after_a_full_pass() {
    let energy = calculate_energy(&noisy(15, 11));
    let graph = SeamGraph::new(&energy);
    for x in 0..15u32 {
        assert_eq!(graph.cell(x, 0).cumulative, Some(energy[(x, 0)]));
    }
    for y in 1..11 {
        for x in 0..15u32 {
            let lo = x.saturating_sub(1);
            let hi = (x + 1).min(14);
            let best = (lo..=hi)
                .map(|p| graph.cell(p, y - 1).cumulative.unwrap())
                .fold(std::f64::INFINITY, f64::min);
            assert_eq!(graph.cell(x, y).cumulative, Some(energy[(x, y)] + best));
        }
    }
}

#[test]
fn every_candidate_is_a_contiguous_full_height_seam() {
    let graph = SeamGraph::new(&calculate_energy(&noisy(20, 13)));
    let candidates = SeamSelector::new(&graph).candidates();
    assert!(!candidates.is_empty());
    for seam in candidates {
        assert_eq!(seam.len(), 13);
        assert!(seam.is_contiguous());
    }
}

#[test]
fn removing_the_best_seam_keeps_the_rest_of_each_row() {
    let image = noisy(10, 7);
    let graph = SeamGraph::new(&calculate_energy(&image));
    let seam = SeamSelector::new(&graph).best().unwrap();
    let narrower = remove_vertical_seam(&image, &seam.columns).unwrap();
    assert_eq!(narrower.dimensions(), (9, 7));
    for y in 0..7 {
        let mut row: Vec<Rgb<u8>> = (0..10).map(|x| *image.get_pixel(x, y)).collect();
        row.remove(seam.columns[y as usize] as usize);
        let carved: Vec<Rgb<u8>> = (0..9).map(|x| *narrower.get_pixel(x, y)).collect();
        assert_eq!(carved, row);
    }
}

#[test]
fn carving_twice_equals_carving_two_columns() {
    let image = noisy(14, 8);

    let mut stepwise = SeamCarver::new(image.clone());
    stepwise.carve_once().unwrap();
    stepwise.carve_once().unwrap();

    let batch = seamcarve(&image, Target::Remove(2)).unwrap();
    assert_eq!(stepwise.image(), &batch);
}

#[test]
fn recomputing_energy_equals_fresh_runs() {
    let image = noisy(14, 8);

    let once = seamcarve(&image, Target::Remove(1)).unwrap();
    let twice = seamcarve(&once, Target::Remove(1)).unwrap();

    let mut carver = SeamCarver::new(image).with_refresh(EnergyRefresh::Recompute);
    carver.carve(Target::Width(12)).unwrap();
    assert_eq!(carver.image(), &twice);
}

#[test]
fn carving_is_deterministic() {
    let image = noisy(16, 10);
    assert_eq!(
        seamcarve(&image, Target::Width(9)).unwrap(),
        seamcarve(&image, Target::Width(9)).unwrap()
    );
    assert_eq!(calculate_energy(&image), calculate_energy(&image));
}

#[test]
fn targets_that_do_not_shrink_are_rejected() {
    let image = noisy(5, 5);
    assert!(seamcarve(&image, Target::Width(5)).is_err());
    assert!(seamcarve(&image, Target::Width(0)).is_err());
    assert!(seamcarve(&image, Target::Remove(5)).is_err());
}
