use std::io::Cursor;

use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use super::DecodeError;

/// Sample rate the translation engine expects.
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

const RESAMPLE_CHUNK_SIZE: usize = 1024;

/// Mono PCM samples at a known rate.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl DecodedAudio {
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

/// Decode an encoded audio container and bring it to `target_rate` mono.
pub fn normalize(data: &[u8], target_rate: u32) -> Result<DecodedAudio, DecodeError> {
    let decoded = decode(data)?;
    let source_rate = decoded.sample_rate;
    let samples = resample(decoded.samples, source_rate, target_rate)?;

    let audio = DecodedAudio {
        samples,
        sample_rate: target_rate,
    };

    tracing::debug!(
        source_rate = source_rate,
        target_rate = target_rate,
        samples = audio.samples.len(),
        duration_secs = audio.duration_secs(),
        "Audio normalized to mono PCM"
    );

    Ok(audio)
}

/// Decode any container symphonia recognizes into mono f32 samples at the
/// stream's native rate. Multi-channel audio is averaged down to mono.
pub fn decode(data: &[u8]) -> Result<DecodedAudio, DecodeError> {
    if data.is_empty() {
        return Err(DecodeError::Empty);
    }

    let cursor = Cursor::new(data.to_vec());
    let mss = MediaSourceStream::new(Box::new(cursor), Default::default());

    let probed = symphonia::default::get_probe()
        .format(
            &Hint::new(),
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| DecodeError::Probe(e.to_string()))?;

    let mut format = probed.format;

    let track = format.default_track().ok_or(DecodeError::NoTrack)?;
    let track_id = track.id;
    let codec_params = track.codec_params.clone();
    let sample_rate = codec_params
        .sample_rate
        .ok_or(DecodeError::UnknownSampleRate)?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(|e| DecodeError::Codec(e.to_string()))?;

    let mut samples: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(SymphoniaError::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => return Err(DecodeError::Packet(e.to_string())),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(SymphoniaError::DecodeError(e)) => {
                tracing::warn!(error = %e, "Skipping corrupt audio frame");
                continue;
            }
            Err(e) => return Err(DecodeError::Packet(e.to_string())),
        };

        let spec = *decoded.spec();
        let num_frames = decoded.frames();
        if num_frames == 0 {
            continue;
        }
        let channels = spec.channels.count().max(1);

        let mut sample_buf = SampleBuffer::<f32>::new(num_frames as u64, spec);
        sample_buf.copy_interleaved_ref(decoded);

        if channels > 1 {
            samples.extend(
                sample_buf
                    .samples()
                    .chunks(channels)
                    .map(|frame| frame.iter().sum::<f32>() / channels as f32),
            );
        } else {
            samples.extend_from_slice(sample_buf.samples());
        }
    }

    if samples.is_empty() {
        return Err(DecodeError::NoSamples);
    }

    Ok(DecodedAudio {
        samples,
        sample_rate,
    })
}

/// Resample mono audio from `from_rate` to `to_rate`.
///
/// Audio already at `to_rate` is returned untouched.
pub fn resample(samples: Vec<f32>, from_rate: u32, to_rate: u32) -> Result<Vec<f32>, DecodeError> {
    if from_rate == to_rate || samples.is_empty() {
        return Ok(samples);
    }
    if from_rate == 0 || to_rate == 0 {
        return Err(DecodeError::Resample(format!(
            "invalid rates {} -> {}",
            from_rate, to_rate
        )));
    }

    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };

    let ratio = to_rate as f64 / from_rate as f64;

    let mut resampler = SincFixedIn::<f32>::new(ratio, 2.0, params, RESAMPLE_CHUNK_SIZE, 1)
        .map_err(|e| DecodeError::Resample(format!("init: {}", e)))?;

    let expected_len = (samples.len() as f64 * ratio).round() as usize;
    let delay = resampler.output_delay();
    let mut output = Vec::with_capacity(expected_len + delay + RESAMPLE_CHUNK_SIZE);

    let mut process = |chunk: Vec<f32>, output: &mut Vec<f32>| -> Result<(), DecodeError> {
        let result = resampler
            .process(&[chunk], None)
            .map_err(|e| DecodeError::Resample(e.to_string()))?;
        if let Some(channel) = result.first() {
            output.extend_from_slice(channel);
        }
        Ok(())
    };

    for chunk in samples.chunks(RESAMPLE_CHUNK_SIZE) {
        let mut input = chunk.to_vec();
        input.resize(RESAMPLE_CHUNK_SIZE, 0.0);
        process(input, &mut output)?;
    }

    // Flush the filter tail so the delayed samples come out.
    while output.len() < expected_len + delay {
        process(vec![0.0; RESAMPLE_CHUNK_SIZE], &mut output)?;
    }

    output.drain(..delay);
    output.truncate(expected_len);

    Ok(output)
}
