use std::collections::HashSet;

use exif_grouper::core::grouping::{GroupingEngine, MODIFIED, ORIGINAL};
use exif_grouper::core::tags::TagDecoder;
use exif_grouper::models::{
    Dimensions, GroupAxis, GroupingOptions, MetadataRecord, RawTagMap, RawValue,
};

const MAKE: u16 = 0x010F;
const MODEL: u16 = 0x0110;
const SOFTWARE: u16 = 0x0131;
const DATE_TIME: u16 = 0x0132;
const DATE_TIME_ORIGINAL: u16 = 0x9003;
const DATE_TIME_DIGITIZED: u16 = 0x9004;
const EXIF_WIDTH: u16 = 0xA002;
const EXIF_HEIGHT: u16 = 0xA003;

fn text(value: &str) -> RawValue {
    RawValue::Text(value.to_string())
}

fn int(value: i64) -> RawValue {
    RawValue::Integer(vec![value])
}

fn record(name: &str, tags: Vec<(u16, RawValue)>) -> MetadataRecord {
    sized(name, tags, 100, 100)
}

fn sized(name: &str, tags: Vec<(u16, RawValue)>, width: u32, height: u32) -> MetadataRecord {
    let raw: RawTagMap = tags.into_iter().collect();
    MetadataRecord::new(
        format!("/photos/{name}"),
        TagDecoder::decode_map(&raw),
        Dimensions::new(width, height),
    )
}

fn dated(name: &str, dt: &str, original: &str, digitized: &str) -> MetadataRecord {
    record(
        name,
        vec![
            (DATE_TIME, text(dt)),
            (DATE_TIME_ORIGINAL, text(original)),
            (DATE_TIME_DIGITIZED, text(digitized)),
        ],
    )
}

#[test]
fn make_and_model_group_by_exact_value_in_input_order() {
    let records = vec![
        record("1.jpg", vec![(MAKE, text("Canon")), (MODEL, text("EOS R"))]),
        record("2.jpg", vec![(MAKE, text("Nikon")), (MODEL, text("Z6"))]),
        record("3.jpg", vec![(MAKE, text("Canon")), (MODEL, text("EOS 5D"))]),
        record("4.jpg", vec![(MODEL, text("Z6"))]),
        record("5.jpg", vec![]),
        record("6.jpg", vec![(MAKE, text("canon"))]),
    ];

    let report = GroupingEngine::group(
        &records,
        &GroupingOptions {
            make_model: true,
            ..GroupingOptions::default()
        },
    );

    let make = report.get(GroupAxis::Make).expect("make axis requested");
    assert_eq!(make.keys().collect::<Vec<_>>(), vec!["Canon", "Nikon", "canon"]);
    assert_eq!(make.get("Canon"), Some(&[String::from("1.jpg"), String::from("3.jpg")][..]));
    assert_eq!(make.get("Nikon"), Some(&[String::from("2.jpg")][..]));

    let model = report.get(GroupAxis::Model).expect("model axis requested");
    assert_eq!(model.keys().collect::<Vec<_>>(), vec!["EOS R", "Z6", "EOS 5D"]);
    assert_eq!(model.get("Z6"), Some(&[String::from("2.jpg"), String::from("4.jpg")][..]));

    assert!(report.get(GroupAxis::Date).is_none());
    assert!(report.faults.is_empty());
}

#[test]
fn matching_timestamps_are_original() {
    let records = vec![
        dated("a.jpg", "2020/01/01", "2020/01/01", "2020/01/01"),
        dated("b.jpg", "2020/01/01", "2020/01/01", "2020/01/01"),
        dated("c.jpg", "2020/01/01", "2020/01/01", "2020/01/01"),
        dated("d.jpg", "2021/05/05", "2020/01/01", "2020/01/01"),
    ];

    let report = GroupingEngine::group(
        &records,
        &GroupingOptions {
            date: true,
            ..GroupingOptions::default()
        },
    );
    let date = report.get(GroupAxis::Date).expect("date axis requested");

    assert_eq!(
        date.get(ORIGINAL),
        Some(&[String::from("a.jpg"), String::from("b.jpg"), String::from("c.jpg")][..])
    );
    assert_eq!(date.get(MODIFIED), Some(&[String::from("d.jpg")][..]));
}

#[test]
fn missing_timestamps_compare_as_empty() {
    let records = vec![
        record("none.jpg", vec![]),
        record("partial.jpg", vec![(DATE_TIME, text("2020:01:01 00:00:00"))]),
    ];

    let report = GroupingEngine::group(
        &records,
        &GroupingOptions {
            date: true,
            ..GroupingOptions::default()
        },
    );
    let date = report.get(GroupAxis::Date).expect("date axis requested");

    assert_eq!(date.get(ORIGINAL), Some(&[String::from("none.jpg")][..]));
    assert_eq!(date.get(MODIFIED), Some(&[String::from("partial.jpg")][..]));
}

#[test]
fn date_buckets_exist_even_without_records() {
    let report = GroupingEngine::group(
        &[],
        &GroupingOptions {
            date: true,
            ..GroupingOptions::default()
        },
    );
    let date = report.get(GroupAxis::Date).expect("date axis requested");

    assert_eq!(date.keys().collect::<Vec<_>>(), vec![ORIGINAL, MODIFIED]);
    assert_eq!(date.get(ORIGINAL), Some(&[][..]));
    assert_eq!(date.get(MODIFIED), Some(&[][..]));
}

#[test]
fn resized_images_are_modified() {
    let exif_dims = || vec![(EXIF_WIDTH, int(4000)), (EXIF_HEIGHT, int(3000))];
    let records = vec![
        sized("full.jpg", exif_dims(), 4000, 3000),
        sized("small.jpg", exif_dims(), 1200, 900),
        sized("cropped.jpg", exif_dims(), 4000, 2000),
        sized("untagged.jpg", vec![], 4000, 3000),
        sized("half.jpg", vec![(EXIF_WIDTH, int(4000))], 4000, 3000),
    ];

    let report = GroupingEngine::group(
        &records,
        &GroupingOptions {
            size: true,
            ..GroupingOptions::default()
        },
    );
    let size = report.get(GroupAxis::Size).expect("size axis requested");

    assert_eq!(size.get(ORIGINAL), Some(&[String::from("full.jpg")][..]));
    assert_eq!(
        size.get(MODIFIED),
        Some(&[String::from("small.jpg"), String::from("cropped.jpg")][..])
    );
    assert_eq!(size.filenames().count(), 3);
}

#[test]
fn software_groups_first_seen() {
    let records = vec![
        record("1.jpg", vec![(SOFTWARE, text("GIMP 2.10"))]),
        record("2.jpg", vec![(SOFTWARE, text("Photoshop"))]),
        record("3.jpg", vec![]),
        record("4.jpg", vec![(SOFTWARE, text("GIMP 2.10"))]),
    ];

    let report = GroupingEngine::group(
        &records,
        &GroupingOptions {
            software: true,
            ..GroupingOptions::default()
        },
    );
    let software = report.get(GroupAxis::Software).expect("software axis requested");

    assert_eq!(software.keys().collect::<Vec<_>>(), vec!["GIMP 2.10", "Photoshop"]);
    assert_eq!(
        software.get("GIMP 2.10"),
        Some(&[String::from("1.jpg"), String::from("4.jpg")][..])
    );
}

#[test]
fn malformed_values_exclude_only_that_record_on_that_axis() {
    let records = vec![
        record("ok.jpg", vec![(MAKE, text("Canon")), (EXIF_WIDTH, int(100)), (EXIF_HEIGHT, int(100))]),
        record(
            "odd.jpg",
            vec![
                (MAKE, int(7)),
                (DATE_TIME, RawValue::Bytes(vec![0xFF, 0xFE])),
                (EXIF_WIDTH, text("wide")),
                (EXIF_HEIGHT, int(100)),
            ],
        ),
        record("also_ok.jpg", vec![(MAKE, text("Canon"))]),
    ];

    let report = GroupingEngine::group(&records, &GroupingOptions::all());

    let make = report.get(GroupAxis::Make).expect("make axis requested");
    assert_eq!(
        make.get("Canon"),
        Some(&[String::from("ok.jpg"), String::from("also_ok.jpg")][..])
    );
    assert!(!make.filenames().any(|name| name == "odd.jpg"));

    let date = report.get(GroupAxis::Date).expect("date axis requested");
    assert_eq!(
        date.get(ORIGINAL),
        Some(&[String::from("ok.jpg"), String::from("also_ok.jpg")][..])
    );

    let size = report.get(GroupAxis::Size).expect("size axis requested");
    assert_eq!(size.get(ORIGINAL), Some(&[String::from("ok.jpg")][..]));

    let faulted: Vec<GroupAxis> = report.faults.iter().map(|fault| fault.axis).collect();
    assert_eq!(faulted, vec![GroupAxis::Make, GroupAxis::Date, GroupAxis::Size]);
    assert!(report.faults.iter().all(|fault| fault.filename == "odd.jpg"));

    let make_fault = report
        .faults_for(GroupAxis::Make)
        .next()
        .expect("make fault recorded");
    assert_eq!(make_fault.tag, "Make");
    assert_eq!(make_fault.found, "integer");
}

#[test]
fn no_filename_lands_in_two_buckets_of_one_axis() {
    let records = vec![
        record("1.jpg", vec![(MAKE, text("A")), (SOFTWARE, text("x")), (DATE_TIME, text("t"))]),
        record("2.jpg", vec![(MAKE, text("B")), (MODEL, text("m"))]),
        dated("3.jpg", "a", "a", "b"),
        sized("4.jpg", vec![(EXIF_WIDTH, int(1)), (EXIF_HEIGHT, int(1))], 1, 1),
        record("5.jpg", vec![(MAKE, int(3))]),
    ];
    let inputs: HashSet<&str> = records.iter().map(|r| r.filename()).collect();

    let report = GroupingEngine::group(&records, &GroupingOptions::all());
    assert_eq!(report.results.len(), 5);

    for (axis, result) in &report.results {
        let mut seen = HashSet::new();
        for name in result.filenames() {
            assert!(inputs.contains(name), "{axis}: unknown file {name}");
            assert!(seen.insert(name), "{axis}: {name} appears twice");
        }
    }
}

#[test]
fn options_select_axes() {
    assert!(GroupingOptions::default().is_empty());
    assert_eq!(
        GroupingOptions::all().axes(),
        vec![
            GroupAxis::Make,
            GroupAxis::Model,
            GroupAxis::Date,
            GroupAxis::Size,
            GroupAxis::Software
        ]
    );

    let records = vec![record("1.jpg", vec![(MAKE, text("A"))])];
    let report = GroupingEngine::group(&records, &GroupingOptions::default());
    assert!(report.results.is_empty());

    let options: GroupingOptions =
        serde_json::from_str(r#"{"size": true}"#).expect("partial options should parse");
    assert_eq!(options.axes(), vec![GroupAxis::Size]);
}

#[test]
fn report_serializes_buckets_in_order() {
    let records = vec![
        dated("b.jpg", "x", "x", "x"),
        dated("a.jpg", "x", "y", "x"),
    ];
    let report = GroupingEngine::group(
        &records,
        &GroupingOptions {
            date: true,
            ..GroupingOptions::default()
        },
    );

    let json = report.to_json().expect("report should serialize");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["results"]["Date"]["Original"][0], "b.jpg");
    assert_eq!(value["results"]["Date"]["Modified"][0], "a.jpg");
    assert!(json.find("Original") < json.find("Modified"));
}

#[test]
fn grouping_twice_gives_the_same_report() {
    let records = vec![
        record("1.jpg", vec![(MAKE, text("A")), (SOFTWARE, text("x"))]),
        dated("2.jpg", "a", "b", "c"),
    ];
    let first = GroupingEngine::group(&records, &GroupingOptions::all());
    let second = GroupingEngine::group(&records, &GroupingOptions::all());
    assert_eq!(first, second);
}
