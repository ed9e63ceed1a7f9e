//! 학습 진행률 표시 (verbose 모드)
//!
//! 터미널이면 indicatif 막대를 그리고, stderr가 리다이렉트되어 막대가 숨겨지면
//! 에포크마다 `Loss: x.xxx: NN%| pos/len` 한 줄을 대신 쓴다.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::Write;

const PROGRESS_TEMPLATE: &str =
    "{msg}: {percent}%|{wide_bar}| {pos}/{len} [{elapsed_precise}<{eta_precise}]";

/// 진행률 막대에 표시되는 손실 문구. 소수점 3자리
pub fn loss_description(loss: f32) -> String {
    format!("Loss: {:.3}", loss)
}

/// 막대를 못 그릴 때 쓰는 한 줄 형식
pub fn progress_line(loss: f32, position: usize, total: usize) -> String {
    let percent = if total == 0 { 100 } else { position * 100 / total };
    format!("{}: {}%| {}/{}", loss_description(loss), percent, position, total)
}

enum Display {
    Hidden,
    Bar(ProgressBar),
    Lines {
        sink: Box<dyn Write + Send>,
        position: usize,
    },
}

/// 에포크 단위 진행률. verbose가 꺼져 있으면 아무것도 그리지 않는다
pub struct TrainingProgress {
    display: Display,
    epochs: usize,
}

impl TrainingProgress {
    pub fn new(epochs: usize, verbose: bool) -> Self {
        if !verbose {
            return Self { display: Display::Hidden, epochs };
        }

        let bar = ProgressBar::with_draw_target(Some(epochs as u64), ProgressDrawTarget::stderr());
        if bar.is_hidden() {
            return Self::with_writer(epochs, std::io::stderr());
        }

        let style = ProgressStyle::with_template(PROGRESS_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);
        bar.set_message(loss_description(0.0));

        Self { display: Display::Bar(bar), epochs }
    }

    /// 주어진 writer에 에포크마다 한 줄씩 기록
    pub fn with_writer<W: Write + Send + 'static>(epochs: usize, sink: W) -> Self {
        Self {
            display: Display::Lines {
                sink: Box::new(sink),
                position: 0,
            },
            epochs,
        }
    }

    /// 에포크 하나가 끝날 때 호출
    pub fn epoch_finished(&mut self, last_loss: f32) {
        match &mut self.display {
            Display::Hidden => {}
            Display::Bar(bar) => {
                bar.set_message(loss_description(last_loss));
                bar.inc(1);
            }
            Display::Lines { sink, position } => {
                *position += 1;
                let line = progress_line(last_loss, *position, self.epochs);
                // 진행률 출력 실패는 학습을 멈추지 않는다
                if writeln!(sink, "{}", line).and_then(|_| sink.flush()).is_err() {
                    log::warn!("진행률 출력 실패: {}", line);
                }
            }
        }
    }

    pub fn finish(&mut self) {
        match &mut self.display {
            Display::Bar(bar) => bar.finish(),
            Display::Lines { sink, .. } => {
                let _ = sink.flush();
            }
            Display::Hidden => {}
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self.display, Display::Hidden)
    }
}
