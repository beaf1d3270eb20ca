use super::*;

use crate::config::EvalOpts;
use crate::filter::store::SOURCE_GRAPHIC;
use crate::raster::buffer::CpuBuffer;

fn run_merge(merge: &Merge, store: &NamedBufferStore) -> RasterFxResult<CpuBuffer> {
    let input = BufferName::source_graphic();
    let opts = EvalOpts::default();
    let ctx = ProcessCtx {
        label: "feMerge (primitive #0)",
        effective_input: &input,
        opts: &opts,
    };
    merge.process(&ctx, store)
}

#[test]
fn later_nodes_draw_on_top() {
    let mut store = NamedBufferStore::with_source_graphic(
        CpuBuffer::filled(2, 2, [255, 0, 0, 255]).unwrap(),
    );
    let green = crate::foundation::core::Rgba8Premul::from_straight_rgba(0, 255, 0, 128);
    store.insert("green", CpuBuffer::filled(2, 2, green.to_array()).unwrap());
    store.insert("clear", CpuBuffer::allocate(2, 2).unwrap());

    let merge = Merge::new(vec![
        MergeNode::inherit(),
        MergeNode::with_input("green"),
        MergeNode::with_input("clear"),
    ]);
    let out = run_merge(&merge, &store).unwrap();
    for y in 0..2 {
        for x in 0..2 {
            assert_eq!(out.pixel(x, y), Some([127, 128, 0, 255]));
        }
    }
}

#[test]
fn output_takes_first_input_size() {
    let mut store = NamedBufferStore::with_source_graphic(
        CpuBuffer::filled(3, 3, [0, 0, 255, 255]).unwrap(),
    );
    store.insert("small", CpuBuffer::filled(1, 2, [255, 0, 0, 255]).unwrap());

    let out = run_merge(&Merge::of(["small", SOURCE_GRAPHIC]), &store).unwrap();
    assert_eq!((out.width(), out.height()), (1, 2));
    assert_eq!(out.pixel(0, 1), Some([0, 0, 255, 255]));

    let out = run_merge(&Merge::of([SOURCE_GRAPHIC, "small"]), &store).unwrap();
    assert_eq!((out.width(), out.height()), (3, 3));
    assert_eq!(out.pixel(0, 1), Some([255, 0, 0, 255]));
    assert_eq!(out.pixel(0, 2), Some([0, 0, 255, 255]));
}

#[test]
fn unset_nodes_inherit_effective_input() {
    let merge = Merge::new(vec![MergeNode::inherit(), MergeNode::with_input("a")]);
    let effective = BufferName::from("prev");
    assert_eq!(
        merge.inputs(&effective),
        vec![BufferName::from("prev"), BufferName::from("a")]
    );
}

#[test]
fn missing_node_input_is_reported() {
    let store = NamedBufferStore::with_source_graphic(CpuBuffer::allocate(1, 1).unwrap());
    let err = run_merge(&Merge::of(["ghost"]), &store).unwrap_err();
    match err {
        RasterFxError::MissingBuffer { primitive, buffer } => {
            assert_eq!(primitive, "feMerge (primitive #0)");
            assert_eq!(buffer, BufferName::from("ghost"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn empty_merge_is_invalid() {
    assert!(Merge::default().validate().is_err());
    assert!(Merge::of(["a"]).validate().is_ok());
}
