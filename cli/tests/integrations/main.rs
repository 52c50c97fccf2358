mod batch;
mod run;
mod show;
