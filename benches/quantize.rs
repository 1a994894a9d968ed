use criterion::{Criterion, criterion_group, criterion_main};
use fastq_quantize::{
    FastqWriter, PHRED33_OFFSET, QualityLevels, QuantizingReader, ReaderOptions, quantize,
    transduce,
};
use std::io::{BufReader, Cursor, sink};

fn bench_quantize(c: &mut Criterion) {
    let mut data = String::new();
    for i in 0..2000 {
        data.push_str(&format!(
            "@r{i}\nACGTACGTACGTACGT\n+\n#(-27<AF#(-27<AF\n"
        ));
    }
    let levels = QualityLevels::new(8).unwrap();

    c.bench_function("transduce_2000_records", |b| {
        b.iter(|| {
            let rdr = BufReader::new(Cursor::new(data.clone().into_bytes()));
            let mut fq = QuantizingReader::from_bufread(rdr, ReaderOptions::new(levels));
            let mut out = FastqWriter::from_write(sink());
            transduce(&mut fq, &mut out).unwrap().bases
        })
    });

    let qual: Vec<u8> = (0..150u8).map(|i| PHRED33_OFFSET + i % 41).collect();
    c.bench_function("quantize_150bp", |b| {
        b.iter(|| quantize(&qual, levels, PHRED33_OFFSET))
    });
}

criterion_group!(benches, bench_quantize);
criterion_main!(benches);
