//! WebAudio tone engine: oscillator notes and filtered noise bursts routed
//! through a short echo and a master compressor.
//!
//! The context is created on the first sound request, which always arrives
//! from a user gesture, so autoplay policies let it start.

use joy_core::{FeedbackError, NoiseBurst, Tone, ToneEngine, Waveform};
use rand::Rng;
use wasm_bindgen::JsValue;
use web_sys as web;

const MASTER_GAIN: f32 = 0.85;
const ECHO_SEND: f32 = 0.18;
const ECHO_DELAY_SEC: f32 = 0.18;
const ECHO_FEEDBACK: f32 = 0.22;
const ECHO_LOWPASS_HZ: f32 = 2200.0;
const SILENT: f32 = 0.0001;
const MIN_GLIDE_TARGET_HZ: f32 = 30.0;

fn js_err(label: &str, e: JsValue) -> FeedbackError {
    log::error!("[audio] {} error: {:?}", label, e);
    FeedbackError::AudioUnavailable(format!("{} failed", label))
}

fn create_gain(ctx: &web::AudioContext, value: f32, label: &str) -> Result<web::GainNode, FeedbackError> {
    let g = web::GainNode::new(ctx).map_err(|e| js_err(label, e))?;
    g.gain().set_value(value);
    Ok(g)
}

fn create_filter(
    ctx: &web::AudioContext,
    kind: web::BiquadFilterType,
    hz: f32,
    label: &str,
) -> Result<web::BiquadFilterNode, FeedbackError> {
    let f = web::BiquadFilterNode::new(ctx).map_err(|e| js_err(label, e))?;
    f.set_type(kind);
    f.frequency().set_value(hz);
    Ok(f)
}

fn oscillator_type(w: Waveform) -> web::OscillatorType {
    match w {
        Waveform::Sine => web::OscillatorType::Sine,
        Waveform::Square => web::OscillatorType::Square,
        Waveform::Saw => web::OscillatorType::Sawtooth,
        Waveform::Triangle => web::OscillatorType::Triangle,
    }
}

struct Graph {
    ctx: web::AudioContext,
    master: web::GainNode,
    noise: web::AudioBuffer,
}

impl Graph {
    fn build() -> Result<Self, FeedbackError> {
        let ctx = web::AudioContext::new().map_err(|e| js_err("AudioContext", e))?;
        let master = create_gain(&ctx, MASTER_GAIN, "master")?;

        let comp = web::DynamicsCompressorNode::new(&ctx).map_err(|e| js_err("compressor", e))?;
        comp.threshold().set_value(-22.0);
        comp.knee().set_value(28.0);
        comp.ratio().set_value(10.0);
        comp.attack().set_value(0.003);
        comp.release().set_value(0.18);

        let send = create_gain(&ctx, ECHO_SEND, "echo send")?;
        let delay = web::DelayNode::new(&ctx).map_err(|e| js_err("delay", e))?;
        delay.delay_time().set_value(ECHO_DELAY_SEC);
        let damp = create_filter(&ctx, web::BiquadFilterType::Lowpass, ECHO_LOWPASS_HZ, "echo filter")?;
        let feedback = create_gain(&ctx, ECHO_FEEDBACK, "echo feedback")?;

        let dest = ctx.destination();
        let links: [(&web::AudioNode, &web::AudioNode); 7] = [
            (&master, &comp),
            (&comp, &dest),
            (&master, &send),
            (&send, &delay),
            (&delay, &damp),
            (&damp, &feedback),
            (&feedback, &delay),
        ];
        for (from, to) in links {
            from.connect_with_audio_node(to).map_err(|e| js_err("connect", e))?;
        }
        damp.connect_with_audio_node(&comp).map_err(|e| js_err("connect", e))?;

        let noise = Self::noise_buffer(&ctx)?;
        log::info!("[audio] context ready at {} Hz", ctx.sample_rate());
        Ok(Self { ctx, master, noise })
    }

    /// One second of white noise, mono.
    fn noise_buffer(ctx: &web::AudioContext) -> Result<web::AudioBuffer, FeedbackError> {
        let sr = ctx.sample_rate();
        let len = sr as u32;
        let buf = ctx.create_buffer(1, len, sr).map_err(|e| js_err("noise buffer", e))?;
        let mut rng = rand::thread_rng();
        let mut samples: Vec<f32> = (0..len).map(|_| rng.gen_range(-1.0..=1.0)).collect();
        buf.copy_to_channel(&mut samples, 0).map_err(|e| js_err("noise fill", e))?;
        Ok(buf)
    }

    fn wake(&self) {
        if self.ctx.state() == web::AudioContextState::Suspended {
            let _ = self.ctx.resume();
        }
    }

    fn tone(&self, tone: &Tone) -> Result<(), JsValue> {
        let t = self.ctx.current_time();
        let dur = tone.duration_sec.max(0.01) as f64;
        let osc = web::OscillatorNode::new(&self.ctx)?;
        osc.set_type(oscillator_type(tone.waveform));
        osc.frequency().set_value_at_time(tone.frequency_hz, t)?;
        if tone.glide_hz != 0.0 {
            let target = (tone.frequency_hz + tone.glide_hz).max(MIN_GLIDE_TARGET_HZ);
            osc.frequency().exponential_ramp_to_value_at_time(target, t + dur)?;
        }

        let filter = web::BiquadFilterNode::new(&self.ctx)?;
        filter.set_type(web::BiquadFilterType::Lowpass);
        filter.frequency().set_value_at_time(tone.cutoff_hz, t)?;

        let gain = web::GainNode::new(&self.ctx)?;
        let env = gain.gain();
        env.set_value_at_time(SILENT, t)?;
        env.exponential_ramp_to_value_at_time(tone.volume.max(SILENT), t + 0.015)?;
        env.exponential_ramp_to_value_at_time(SILENT, t + dur)?;

        osc.connect_with_audio_node(&filter)?;
        filter.connect_with_audio_node(&gain)?;
        gain.connect_with_audio_node(&self.master)?;
        osc.start_with_when(t)?;
        osc.stop_with_when(t + dur + 0.05)?;
        Ok(())
    }

    fn noise(&self, noise: &NoiseBurst) -> Result<(), JsValue> {
        let t = self.ctx.current_time();
        let dur = noise.duration_sec.max(0.01) as f64;
        let src = web::AudioBufferSourceNode::new(&self.ctx)?;
        src.set_buffer(Some(&self.noise));
        src.playback_rate().set_value_at_time(noise.playback_rate, t)?;

        let hp = web::BiquadFilterNode::new(&self.ctx)?;
        hp.set_type(web::BiquadFilterType::Highpass);
        hp.frequency().set_value_at_time(noise.highpass_hz, t)?;
        let lp = web::BiquadFilterNode::new(&self.ctx)?;
        lp.set_type(web::BiquadFilterType::Lowpass);
        lp.frequency().set_value_at_time(noise.lowpass_hz, t)?;

        let gain = web::GainNode::new(&self.ctx)?;
        let env = gain.gain();
        env.set_value_at_time(SILENT, t)?;
        env.exponential_ramp_to_value_at_time(noise.volume.max(SILENT), t + 0.01)?;
        env.exponential_ramp_to_value_at_time(SILENT, t + dur)?;

        src.connect_with_audio_node(&hp)?;
        hp.connect_with_audio_node(&lp)?;
        lp.connect_with_audio_node(&gain)?;
        gain.connect_with_audio_node(&self.master)?;

        let span = (self.noise.duration() - dur * 1.5).max(0.0);
        let offset = rand::thread_rng().gen_range(0.0..=span);
        src.start_with_when_and_grain_offset(t, offset)?;
        src.stop_with_when(t + dur + 0.02)?;
        Ok(())
    }
}

#[derive(Default)]
pub struct WebAudio {
    graph: Option<Graph>,
}

impl WebAudio {
    pub fn new() -> Self {
        Self::default()
    }

    fn graph(&mut self) -> Result<&Graph, FeedbackError> {
        if self.graph.is_none() {
            self.graph = Some(Graph::build()?);
        }
        match self.graph.as_ref() {
            Some(g) => {
                g.wake();
                Ok(g)
            }
            None => Err(FeedbackError::AudioUnavailable("no AudioContext".into())),
        }
    }
}

impl ToneEngine for WebAudio {
    fn play_tone(&mut self, tone: &Tone) -> Result<(), FeedbackError> {
        let g = self.graph()?;
        // Scheduling failures drop the note only.
        if let Err(e) = g.tone(tone) {
            log::debug!("[audio] tone dropped: {:?}", e);
        }
        Ok(())
    }

    fn play_noise_burst(&mut self, noise: &NoiseBurst) -> Result<(), FeedbackError> {
        let g = self.graph()?;
        if let Err(e) = g.noise(noise) {
            log::debug!("[audio] noise dropped: {:?}", e);
        }
        Ok(())
    }
}
