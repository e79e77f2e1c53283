//! Reader for consumer genotyping exports (23andMe and AncestryDNA), plain or gzip-compressed.

use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, ErrorKind, Read};
use std::path::Path;

use flate2::read::GzDecoder;

use crate::error::Error;
use crate::genes::is_panel_variant;
use crate::genotype::VariantCall;
use crate::provider::Provider;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// AncestryDNA's no-call allele.
const NO_CALL: &str = "0";

/// Panel calls extracted from a raw export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawGenotypes {
    /// Provider detected from the file header, or from the column layout.
    pub provider: Provider,
    /// Calls for panel variants only, in file order.
    pub calls: Vec<VariantCall>,
    /// Number of genotype records read, panel or not.
    pub records: usize,
}

/// Open a raw export from disk.
pub fn read_raw_file(path: &Path) -> Result<RawGenotypes, Error> {
    let file = File::open(path)?;
    parse_raw_genotypes(file)
}

/// Parses a 23andMe or AncestryDNA raw data export.
///
/// 23andMe rows have four tab-separated columns: rsid, chromosome, position, genotype.
/// AncestryDNA rows have five: rsid, chromosome, position, allele1, allele2. Lines starting
/// with `#` and the AncestryDNA column header are skipped. Gzip input is detected by its magic
/// bytes. Only variants read by a gene panel are kept.
pub fn parse_raw_genotypes<R: Read>(reader: R) -> Result<RawGenotypes, Error> {
    let (is_gzip, reader) = sniff_gzip(reader)?;
    let lines: Box<dyn BufRead + '_> = if is_gzip {
        Box::new(BufReader::new(GzDecoder::new(reader)))
    } else {
        Box::new(BufReader::new(reader))
    };

    let mut provider = Provider::Unknown;
    let mut calls = Vec::new();
    let mut records = 0;

    for (line_num, line_result) in lines.lines().enumerate() {
        let line = line_result?;
        let line = line.trim_end_matches('\r');

        if let Some(comment) = line.strip_prefix('#') {
            if provider == Provider::Unknown {
                provider = detect_provider(comment);
            }
            continue;
        }
        if line.trim().is_empty() || line.starts_with("rsid\t") {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
        let genotype = match fields.len() {
            4 => Some(fields[3].to_string()),
            5 => {
                if provider == Provider::Unknown {
                    provider = Provider::AncestryDna;
                }
                ancestry_genotype(fields[3], fields[4])
            }
            n => {
                return Err(Error::Format(format!(
                    "line {}: expected 4 (23andMe) or 5 (AncestryDNA) tab-separated columns, \
                     got {n}",
                    line_num + 1
                )));
            }
        };
        records += 1;

        if is_panel_variant(fields[0]) {
            calls.push(VariantCall {
                variant_id: fields[0].to_ascii_lowercase(),
                genotype,
            });
        }
    }

    tracing::debug!(%provider, records, panel_calls = calls.len(), "parsed raw genotypes");

    Ok(RawGenotypes {
        provider,
        calls,
        records,
    })
}

fn detect_provider(comment: &str) -> Provider {
    let lower = comment.to_ascii_lowercase();
    if lower.contains("23andme") {
        Provider::TwentyThreeAndMe
    } else if lower.contains("ancestrydna") {
        Provider::AncestryDna
    } else {
        Provider::Unknown
    }
}

fn ancestry_genotype(allele1: &str, allele2: &str) -> Option<String> {
    if allele1 == NO_CALL || allele2 == NO_CALL {
        None
    } else {
        Some(format!("{allele1}{allele2}"))
    }
}

/// Reads up to the two magic bytes, retrying short reads, and hands back a reader that replays
/// them.
fn sniff_gzip<R: Read>(mut reader: R) -> Result<(bool, impl Read), Error> {
    let mut head = [0u8; 2];
    let mut filled = 0;
    while filled < head.len() {
        match reader.read(&mut head[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    let is_gzip = head[..filled] == GZIP_MAGIC;
    Ok((is_gzip, Cursor::new(head).take(filled as u64).chain(reader)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    const SAMPLE_23ANDME: &str = "\
# This data file generated by 23andMe at: Mon Jan 01 00:00:00 2024
# rsid\tchromosome\tposition\tgenotype
rs4477212\t1\t82154\tAA
rs4148323\t2\t234669144\tAG
rs4149056\t12\t21331549\tCT
i3000001\t1\t1000\t--
rs6025\t1\t169519049\t--
";

    const SAMPLE_ANCESTRY: &str = "\
#AncestryDNA raw data download
#This file was generated by AncestryDNA at: 01/01/2024
rsid\tchromosome\tposition\tallele1\tallele2
rs3131972\t1\t752721\tA\tG
rs776746\t7\t99672916\tG\tG
rs9923231\t16\t31096368\t0\t0
";

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::fast());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn parse_23andme() {
        let raw = parse_raw_genotypes(SAMPLE_23ANDME.as_bytes()).unwrap();
        assert_eq!(raw.provider, Provider::TwentyThreeAndMe);
        assert_eq!(raw.records, 5);
        assert_eq!(
            raw.calls,
            vec![
                VariantCall::new("rs4148323", Some("AG")),
                VariantCall::new("rs4149056", Some("CT")),
                VariantCall::new("rs6025", Some("--")),
            ]
        );
    }

    #[test]
    fn parse_ancestry_no_calls_are_missing() {
        let raw = parse_raw_genotypes(SAMPLE_ANCESTRY.as_bytes()).unwrap();
        assert_eq!(raw.provider, Provider::AncestryDna);
        assert_eq!(raw.records, 3);
        assert_eq!(
            raw.calls,
            vec![
                VariantCall::new("rs776746", Some("GG")),
                VariantCall::new("rs9923231", None),
            ]
        );
    }

    #[test]
    fn gzip_input_is_detected() {
        let compressed = gzip(SAMPLE_23ANDME.as_bytes());
        let raw = parse_raw_genotypes(compressed.as_slice()).unwrap();
        assert_eq!(raw.provider, Provider::TwentyThreeAndMe);
        assert_eq!(raw.calls.len(), 3);
    }

    /// Hands out one byte per read, like a slow pipe.
    struct Trickle<R>(R);

    impl<R: Read> Read for Trickle<R> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let len = buf.len().min(1);
            self.0.read(&mut buf[..len])
        }
    }

    #[test]
    fn gzip_detected_through_short_reads() {
        let compressed = gzip(SAMPLE_ANCESTRY.as_bytes());
        let raw = parse_raw_genotypes(Trickle(compressed.as_slice())).unwrap();
        assert_eq!(raw.provider, Provider::AncestryDna);
        assert_eq!(raw.calls.len(), 2);

        let raw = parse_raw_genotypes(Trickle(SAMPLE_23ANDME.as_bytes())).unwrap();
        assert_eq!(raw.records, 5);
    }

    #[test]
    fn tiny_inputs() {
        assert_eq!(parse_raw_genotypes(&b""[..]).unwrap().records, 0);
        assert_eq!(parse_raw_genotypes(&b"#"[..]).unwrap().records, 0);
    }

    #[test]
    fn layout_implies_provider_without_header() {
        let raw = parse_raw_genotypes("rs6025\t1\t169519049\tG\tA\n".as_bytes()).unwrap();
        assert_eq!(raw.provider, Provider::AncestryDna);
        assert_eq!(raw.calls[0].genotype.as_deref(), Some("GA"));

        let raw = parse_raw_genotypes("rs6025\t1\t169519049\tGA\n".as_bytes()).unwrap();
        assert_eq!(raw.provider, Provider::Unknown);
    }

    #[test]
    fn crlf_and_blank_lines() {
        let raw = parse_raw_genotypes("\r\nrs6025\t1\t169519049\tAG\r\n\n".as_bytes()).unwrap();
        assert_eq!(raw.calls[0].genotype.as_deref(), Some("AG"));
    }

    #[test]
    fn wrong_column_count() {
        let err = parse_raw_genotypes("rs6025\t1\tAG\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Format(_)));
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn read_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(&gzip(SAMPLE_ANCESTRY.as_bytes())).unwrap();
        let raw = read_raw_file(f.path()).unwrap();
        assert_eq!(raw.calls.len(), 2);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_raw_file(Path::new("/nonexistent/genome.txt")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
